//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced
//! code blocks. Replies arrive whole, so each one is rendered once.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

const CODE_THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown reply.
    ///
    /// Runs of prose between code fences go through termimad as one block
    /// (so lists and tables keep their layout); fenced code goes through
    /// syntect.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();
        let mut prose_buf = String::new();

        for line in markdown.lines() {
            let is_fence = line.trim_start().starts_with("```");
            if is_fence && !in_code_block {
                self.flush_prose(&mut prose_buf, &mut output);
                in_code_block = true;
                code_lang = line.trim_start().trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if is_fence && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                prose_buf.push_str(line);
                prose_buf.push('\n');
            }
        }

        // Unclosed code block
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }
        self.flush_prose(&mut prose_buf, &mut output);

        output
    }

    fn flush_prose(&self, prose: &mut String, output: &mut String) {
        if prose.is_empty() {
            return;
        }
        output.push_str(&format!("{}", self.skin.term_text(prose)));
        prose.clear();
    }

    /// Highlight a code block using syntect.
    ///
    /// The fence tag may carry extra words (` ```rust,ignore `); only the
    /// first token selects the syntax.
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let token = lang
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        let syntax = if token.is_empty() {
            self.syntax_set
                .find_syntax_by_first_line(code)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        } else {
            self.syntax_set
                .find_syntax_by_token(token)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        let header = if token.is_empty() { "code" } else { token };
        output.push_str(&format!("  {}\n", console::style(format!("--- {header} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let mut h = HighlightLines::new(syntax, theme);
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
