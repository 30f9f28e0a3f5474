//! Session engine: the interactive conversation state machine.
//!
//! A `ChatSession` owns the transcript and drives one conversation:
//! it pulls submissions from an [`InputSource`], classifies them, runs
//! in-session commands against a [`ChatView`], and sends messages through
//! a [`CompletionGateway`] while a [`BusyIndicator`] guard is held.
//!
//! Transcript mutation happens only here, on the loop's own task: the user
//! turn before the request is built, the assistant turn after it resolves.

use tracing::{debug, info, warn};

use chatterm_types::config::SessionConfig;
use chatterm_types::transcript::Transcript;
use chatterm_types::wire::PendingRequest;

use crate::busy::BusyIndicator;
use crate::command::{Classified, Command, classify};
use crate::gateway::CompletionGateway;
use crate::input::{InputEvent, InputSource};
use crate::view::ChatView;

/// Label shown next to the busy indicator while a reply is pending.
pub const BUSY_LABEL: &str = "thinking...";

/// Where the session loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next submission.
    AwaitingInput,
    /// Terminal state. The loop has stopped.
    Ended,
}

/// One interactive conversation with a completion gateway.
pub struct ChatSession<G> {
    gateway: G,
    model: String,
    temperature: Option<f32>,
    transcript: Transcript,
    /// Context folded into the first outgoing message, then cleared.
    seed: Option<String>,
    /// Most recent reply text or error text, replayed by `raw`.
    last_reply: Option<String>,
    state: SessionState,
}

impl<G: CompletionGateway> ChatSession<G> {
    /// Create a session from a resolved configuration.
    ///
    /// The system prompt, if any, becomes the first transcript turn.
    pub fn new(gateway: G, config: &SessionConfig) -> Self {
        let transcript = match &config.system_prompt {
            Some(prompt) => Transcript::with_system(prompt.clone()),
            None => Transcript::new(),
        };
        Self {
            gateway,
            model: config.model.clone(),
            temperature: config.temperature,
            transcript,
            seed: None,
            last_reply: None,
            state: SessionState::AwaitingInput,
        }
    }

    /// Attach seed context. It is prepended to the first message only.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Preset the text `raw` shows before any reply has arrived (e.g. a
    /// note explaining why seeding failed).
    pub fn set_last_reply(&mut self, text: impl Into<String>) {
        self.last_reply = Some(text.into());
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether seed context is still waiting for the first message.
    pub fn has_pending_seed(&self) -> bool {
        self.seed.is_some()
    }

    /// Run the loop until the session ends.
    ///
    /// Per-turn failures never escape: they become display text. An error
    /// from the input source itself ends the session.
    pub async fn run<I, V, B>(&mut self, input: &mut I, view: &mut V, busy: &B)
    where
        I: InputSource,
        V: ChatView,
        B: BusyIndicator,
    {
        info!(gateway = self.gateway.name(), model = %self.model, "chat session started");

        while self.state == SessionState::AwaitingInput {
            match input.next_event().await {
                Ok(event) => {
                    self.handle_event(event, view, busy).await;
                }
                Err(e) => {
                    warn!("input source failed, ending session: {e}");
                    self.state = SessionState::Ended;
                }
            }
        }

        view.show_farewell();
        info!(turns = self.transcript.len(), "chat session ended");
    }

    /// Apply one input event and return the resulting state.
    pub async fn handle_event<V, B>(
        &mut self,
        event: InputEvent,
        view: &mut V,
        busy: &B,
    ) -> SessionState
    where
        V: ChatView,
        B: BusyIndicator,
    {
        if self.state == SessionState::Ended {
            return self.state;
        }

        match event {
            InputEvent::EndSession => {
                debug!("end-session gesture");
                self.state = SessionState::Ended;
            }
            InputEvent::Submit(text) => match classify(&text) {
                Classified::NoOp => {}
                Classified::Command(command) => self.execute(command, view),
                Classified::Message(message) => self.submit(message, view, busy).await,
            },
        }

        self.state
    }

    fn execute<V: ChatView>(&mut self, command: Command, view: &mut V) {
        debug!(?command, "session command");
        match command {
            Command::Help => view.show_help(),
            Command::Clear => view.clear(),
            Command::Raw => view.show_raw(self.last_reply.as_deref()),
            Command::Exit => self.state = SessionState::Ended,
        }
    }

    async fn submit<V, B>(&mut self, message: String, view: &mut V, busy: &B)
    where
        V: ChatView,
        B: BusyIndicator,
    {
        let content = match self.seed.take() {
            Some(seed) => format!("{seed}\n\n{message}"),
            None => message,
        };
        self.transcript.push_user(content);

        let result = {
            let _guard = busy.start(BUSY_LABEL);
            let request = PendingRequest {
                model: &self.model,
                turns: self.transcript.turns(),
                temperature: self.temperature,
            };
            debug!(turns = request.turns.len(), "sending transcript");
            self.gateway.complete(request).await
        };

        match result {
            Ok(reply) => {
                self.transcript.push_assistant(reply.clone());
                view.show_reply(&reply);
                self.last_reply = Some(reply);
            }
            Err(e) => {
                warn!(status = ?e.status(), "completion failed: {e}");
                let text = format!("An error occurred: {e}");
                view.show_error(&text);
                self.last_reply = Some(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;
    use std::sync::Mutex;

    use chatterm_types::error::{GatewayError, MalformedResponse};
    use chatterm_types::transcript::{Role, Turn};
    use secrecy::SecretString;

    // -- Test doubles --

    /// Gateway returning queued results and recording every request.
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        requests: Mutex<Vec<Vec<Turn>>>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> Vec<Turn> {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    impl CompletionGateway for ScriptedGateway {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: PendingRequest<'_>) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.turns.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("default".to_string()))
        }
    }

    struct ScriptedInput {
        events: VecDeque<io::Result<InputEvent>>,
    }

    impl ScriptedInput {
        fn submits(lines: &[&str]) -> Self {
            let mut events: VecDeque<_> = lines
                .iter()
                .map(|l| Ok(InputEvent::Submit(l.to_string())))
                .collect();
            events.push_back(Ok(InputEvent::EndSession));
            Self { events }
        }
    }

    impl InputSource for ScriptedInput {
        async fn next_event(&mut self) -> io::Result<InputEvent> {
            self.events
                .pop_front()
                .unwrap_or(Ok(InputEvent::EndSession))
        }
    }

    /// Shared, ordered log of everything the view and indicator did.
    type EventLog = Rc<RefCell<Vec<String>>>;

    struct RecordingView {
        log: EventLog,
    }

    impl ChatView for RecordingView {
        fn show_reply(&mut self, reply: &str) {
            self.log.borrow_mut().push(format!("reply:{reply}"));
        }
        fn show_error(&mut self, message: &str) {
            self.log.borrow_mut().push(format!("error:{message}"));
        }
        fn show_raw(&mut self, last_reply: Option<&str>) {
            self.log
                .borrow_mut()
                .push(format!("raw:{}", last_reply.unwrap_or("<none>")));
        }
        fn show_help(&mut self) {
            self.log.borrow_mut().push("help".to_string());
        }
        fn clear(&mut self) {
            self.log.borrow_mut().push("clear".to_string());
        }
        fn show_farewell(&mut self) {
            self.log.borrow_mut().push("farewell".to_string());
        }
    }

    struct RecordingBusy {
        log: EventLog,
    }

    struct RecordingGuard {
        log: EventLog,
    }

    impl Drop for RecordingGuard {
        fn drop(&mut self) {
            self.log.borrow_mut().push("busy:stop".to_string());
        }
    }

    impl BusyIndicator for RecordingBusy {
        type Guard = RecordingGuard;

        fn start(&self, _label: &str) -> RecordingGuard {
            self.log.borrow_mut().push("busy:start".to_string());
            RecordingGuard {
                log: Rc::clone(&self.log),
            }
        }
    }

    fn config(system_prompt: Option<&str>) -> SessionConfig {
        SessionConfig {
            base_url: "http://localhost".to_string(),
            api_key: SecretString::from("sk-test".to_string()),
            model: "gpt-4".to_string(),
            temperature: None,
            system_prompt: system_prompt.map(str::to_string),
        }
    }

    fn harness() -> (EventLog, RecordingView, RecordingBusy) {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let view = RecordingView {
            log: Rc::clone(&log),
        };
        let busy = RecordingBusy {
            log: Rc::clone(&log),
        };
        (log, view, busy)
    }

    async fn run_lines<G: CompletionGateway>(
        session: &mut ChatSession<G>,
        lines: &[&str],
    ) -> EventLog {
        let (log, mut view, busy) = harness();
        let mut input = ScriptedInput::submits(lines);
        session.run(&mut input, &mut view, &busy).await;
        log
    }

    // -- Transcript accounting --

    #[tokio::test]
    async fn test_transcript_grows_two_per_exchange() {
        let gateway = ScriptedGateway::replying(&["a", "b", "c"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        run_lines(&mut session, &["one", "two", "three"]).await;

        assert_eq!(session.transcript().len(), 6);
        assert_eq!(gateway.calls(), 3);
    }

    #[tokio::test]
    async fn test_transcript_with_system_prompt() {
        let gateway = ScriptedGateway::replying(&["a", "b"]);
        let mut session = ChatSession::new(&gateway, &config(Some("Be terse.")));
        run_lines(&mut session, &["one", "two"]).await;

        assert_eq!(session.transcript().len(), 1 + 4);
        assert_eq!(session.transcript().turns()[0], Turn::system("Be terse."));
        assert_eq!(gateway.request(0)[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_full_transcript_sent_every_call() {
        let gateway = ScriptedGateway::replying(&["first reply", "second reply"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        run_lines(&mut session, &["first", "second"]).await;

        assert_eq!(gateway.request(0), vec![Turn::user("first")]);
        assert_eq!(
            gateway.request(1),
            vec![
                Turn::user("first"),
                Turn::assistant("first reply"),
                Turn::user("second"),
            ]
        );
    }

    // -- Commands --

    #[tokio::test]
    async fn test_help_and_clear_leave_transcript_unchanged() {
        let gateway = ScriptedGateway::replying(&["Hi there"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let (_log, mut view, busy) = harness();

        session
            .handle_event(InputEvent::Submit("Hello".into()), &mut view, &busy)
            .await;
        let before = session.transcript().clone();

        for command in ["help", "clear", "  HELP ", "Clear\n"] {
            let state = session
                .handle_event(InputEvent::Submit(command.into()), &mut view, &busy)
                .await;
            assert_eq!(state, SessionState::AwaitingInput);
        }

        assert_eq!(session.transcript(), &before);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_raw_twice_is_identical() {
        let gateway = ScriptedGateway::replying(&["# Title\n\n**bold**"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let log = run_lines(&mut session, &["hi", "raw", "md"]).await;

        let raws: Vec<String> = log
            .borrow()
            .iter()
            .filter(|e| e.starts_with("raw:"))
            .cloned()
            .collect();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0], raws[1]);
        assert_eq!(raws[0], "raw:# Title\n\n**bold**");
    }

    #[tokio::test]
    async fn test_raw_before_any_reply() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let log = run_lines(&mut session, &["raw"]).await;

        assert!(log.borrow().contains(&"raw:<none>".to_string()));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_is_noop() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let (log, mut view, busy) = harness();

        for blank in ["", "   ", "\n\n\t"] {
            let state = session
                .handle_event(InputEvent::Submit(blank.into()), &mut view, &busy)
                .await;
            assert_eq!(state, SessionState::AwaitingInput);
        }

        assert!(session.transcript().is_empty());
        assert!(session.last_reply().is_none());
        assert_eq!(gateway.calls(), 0);
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_keeps_pending_seed() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None)).with_seed("SEED");
        let (_log, mut view, busy) = harness();

        session
            .handle_event(InputEvent::Submit("  ".into()), &mut view, &busy)
            .await;
        assert!(session.has_pending_seed());
    }

    // -- Scenarios --

    #[tokio::test]
    async fn test_scenario_successful_exchange() {
        let gateway = ScriptedGateway::replying(&["Hi there"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let log = run_lines(&mut session, &["Hello"]).await;

        assert_eq!(
            session.transcript().turns(),
            &[Turn::user("Hello"), Turn::assistant("Hi there")]
        );
        assert!(log.borrow().contains(&"reply:Hi there".to_string()));
        assert_eq!(session.last_reply(), Some("Hi there"));
    }

    #[tokio::test]
    async fn test_scenario_gateway_failure_keeps_loop_alive() {
        let gateway = ScriptedGateway::new(vec![
            Err(GatewayError::Status {
                status: 500,
                body: "upstream exploded".to_string(),
            }),
            Ok("recovered".to_string()),
        ]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let (log, mut view, busy) = harness();

        let state = session
            .handle_event(InputEvent::Submit("Hello".into()), &mut view, &busy)
            .await;

        assert_eq!(state, SessionState::AwaitingInput);
        assert_eq!(session.transcript().turns(), &[Turn::user("Hello")]);
        let last = session.last_reply().unwrap();
        assert!(last.starts_with("An error occurred:"));
        assert!(last.contains("500"));
        assert!(log.borrow().iter().any(|e| e.starts_with("error:An error occurred")));

        // Next turn follows the orphaned user turn; no synthetic reply was sent.
        session
            .handle_event(InputEvent::Submit("again".into()), &mut view, &busy)
            .await;
        assert_eq!(
            gateway.request(1),
            vec![Turn::user("Hello"), Turn::user("again")]
        );
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_shown_as_error() {
        let gateway =
            ScriptedGateway::new(vec![Err(MalformedResponse::MissingChoices.into())]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let log = run_lines(&mut session, &["Hello", "raw"]).await;

        assert_eq!(session.transcript().len(), 1);
        let raw = log
            .borrow()
            .iter()
            .find(|e| e.starts_with("raw:"))
            .cloned()
            .unwrap();
        assert!(raw.contains("choices"));
    }

    #[tokio::test]
    async fn test_scenario_exit_makes_no_call() {
        for word in ["exit", "q", " EXIT "] {
            let gateway = ScriptedGateway::replying(&[]);
            let mut session = ChatSession::new(&gateway, &config(None));
            let (log, mut view, busy) = harness();
            let mut input = ScriptedInput::submits(&[word, "never sent"]);

            session.run(&mut input, &mut view, &busy).await;

            assert_eq!(session.state(), SessionState::Ended);
            assert_eq!(gateway.calls(), 0);
            assert!(session.transcript().is_empty());
            assert_eq!(log.borrow().as_slice(), &["farewell".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_scenario_seed_prefixes_first_message_only() {
        let gateway = ScriptedGateway::replying(&["ok", "ok"]);
        let mut session = ChatSession::new(&gateway, &config(None)).with_seed("MANPAGE_X");
        run_lines(&mut session, &["explain it", "more"]).await;

        let first = &gateway.request(0)[0].content;
        assert!(first.starts_with("MANPAGE_X"));
        assert!(first.ends_with("explain it"));
        assert_eq!(first, "MANPAGE_X\n\nexplain it");

        let second = gateway.request(1);
        assert_eq!(second.last().unwrap(), &Turn::user("more"));
        assert!(!session.has_pending_seed());
    }

    #[tokio::test]
    async fn test_message_content_is_verbatim() {
        let gateway = ScriptedGateway::replying(&["  spaced reply \n"]);
        let mut session = ChatSession::new(&gateway, &config(None));
        run_lines(&mut session, &["    fn main() {}\n"]).await;

        assert_eq!(
            session.transcript().turns(),
            &[
                Turn::user("    fn main() {}\n"),
                Turn::assistant("  spaced reply \n")
            ]
        );
    }

    // -- Busy indicator and lifecycle --

    #[tokio::test]
    async fn test_busy_stops_before_render() {
        let gateway = ScriptedGateway::new(vec![
            Ok("hello".to_string()),
            Err(GatewayError::Transport {
                message: "connection refused".to_string(),
            }),
        ]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let log = run_lines(&mut session, &["a", "b"]).await;

        let log = log.borrow();
        assert_eq!(log[0], "busy:start");
        assert_eq!(log[1], "busy:stop");
        assert_eq!(log[2], "reply:hello");
        assert_eq!(log[3], "busy:start");
        assert_eq!(log[4], "busy:stop");
        assert!(log[5].starts_with("error:"));
    }

    #[tokio::test]
    async fn test_end_session_gesture() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let (_log, mut view, busy) = harness();

        let state = session
            .handle_event(InputEvent::EndSession, &mut view, &busy)
            .await;
        assert_eq!(state, SessionState::Ended);

        // Nothing is processed after the session ended.
        session
            .handle_event(InputEvent::Submit("late".into()), &mut view, &busy)
            .await;
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_input_error_ends_session() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None));
        let (log, mut view, busy) = harness();
        let mut input = ScriptedInput {
            events: VecDeque::from([Err(io::Error::other("terminal gone"))]),
        };

        session.run(&mut input, &mut view, &busy).await;

        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(log.borrow().as_slice(), &["farewell".to_string()]);
    }

    #[tokio::test]
    async fn test_preset_last_reply() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = ChatSession::new(&gateway, &config(None));
        session.set_last_reply("No file was found.");
        let log = run_lines(&mut session, &["raw"]).await;

        assert!(log.borrow().contains(&"raw:No file was found.".to_string()));
        assert!(session.transcript().is_empty());
    }
}
