//! Coach Dialogue Engine - the next coach utterance for a running session.
//!
//! Two responders live here:
//!
//! - [`CoachDialogueEngine::next_utterance`], the AI-backed responder with a
//!   three-state fallback per call: gateway unconfigured resolves to one fixed
//!   reply without attempting the call, a configuration-classified failure
//!   resolves to a second fixed reply, and every other failure (or an empty
//!   completion) draws from a fixed pool of supportive follow-ups.
//! - [`CoachDialogueEngine::rule_based_reply`], the gateway-free keyword
//!   responder offered as the no-AI coaching mode.
//!
//! The pool pick uses an injected seedable RNG so tests can assert pool
//! membership deterministically.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::coaching::{ConversationTurn, Speaker};
use crate::domain::profile::UserProfileContext;
use crate::ports::{CompletionRequest, TextGenerationGateway};

/// Most recent turns included in the prompt transcript.
const HISTORY_WINDOW: usize = 10;

const PERSONA_PROMPT: &str =
    "You are a compassionate, professional relationship coach. You listen carefully, \
     validate feelings, and offer concrete, kind suggestions. Keep replies under 150 words.";

/// Reply when no provider credential exists; fixed so clients can rely on it.
const UNAVAILABLE_REPLY: &str =
    "I'm here to listen. Tell me more about what's been on your mind with your partner lately.";

/// Reply when a call was attempted but failed for configuration reasons.
const CONFIG_ERROR_REPLY: &str =
    "Thank you for sharing that with me. Whatever you're feeling right now is valid, \
     and talking it through is already a meaningful step.";

/// Supportive follow-ups drawn on transient gateway failures.
const SUPPORT_POOL: [&str; 6] = [
    "That sounds really hard. What do you think your partner would say if they heard you describe it this way?",
    "I hear you. When did you first start feeling this way about the situation?",
    "Thank you for opening up. What would a good outcome look like for you here?",
    "It takes courage to talk about this. How has this been affecting the time you spend together?",
    "I can tell this matters to you. What's one small thing that has helped between you two before?",
    "Let's sit with that for a moment. What part of this feels most urgent to you right now?",
];

/// Default replies for the keyword responder when no topic matches.
const DEFAULT_TOPIC_POOL: [&str; 5] = [
    "Tell me more about how that's been affecting your relationship.",
    "How does your partner see this situation, do you think?",
    "What would you like to be different a month from now?",
    "What have you already tried together?",
    "How do you usually bring topics like this up with each other?",
];

/// Keyword-themed replies, checked first-match-wins against lower-cased input.
const TOPIC_RESPONSES: [(&[&str], &str); 8] = [
    (
        &["communicat", "talk", "listen"],
        "Communication is the foundation couples build everything else on. Try setting aside ten \
         uninterrupted minutes today where each of you speaks while the other only listens.",
    ),
    (
        &["trust"],
        "Trust takes time to rebuild, and wanting to rebuild it is itself a hopeful sign. Start \
         with small, kept promises - consistency matters more than grand gestures.",
    ),
    (
        &["fight", "argu", "conflict"],
        "Disagreements are normal; it's how you repair afterwards that shapes a relationship. \
         After things cool down, try naming one thing you each could have done differently.",
    ),
    (
        &["time", "busy", "schedule"],
        "Feeling squeezed for time together is one of the most common strains couples face. Even \
         a standing fifteen-minute walk together can protect your connection.",
    ),
    (
        &["intimacy", "intimate", "distant", "close"],
        "Closeness ebbs and flows in every relationship. Gentle, pressure-free affection and \
         honest conversation about what you each miss is the best way back toward each other.",
    ),
    (
        &["family", "kids", "children", "in-law"],
        "Family pressures can pull couples in different directions. It helps to decide together, \
         as a team, what boundaries you both want before talking with anyone else.",
    ),
    (
        &["money", "finance", "budget", "spend"],
        "Money disagreements are rarely about the numbers - they're about safety and priorities. \
         A regular, judgment-free money check-in can take a lot of heat out of the topic.",
    ),
    (
        &["appreciat", "grateful", "thank"],
        "Feeling appreciated fuels everything else. Try telling your partner one specific thing \
         you valued about them today - specificity is what makes it land.",
    ),
];

/// Produces coach utterances, AI-backed with deterministic fallbacks.
pub struct CoachDialogueEngine {
    gateway: Arc<dyn TextGenerationGateway>,
    rng: Mutex<StdRng>,
}

impl CoachDialogueEngine {
    pub fn new(gateway: Arc<dyn TextGenerationGateway>) -> Self {
        Self {
            gateway,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Builds an engine with a seeded RNG so fallback picks are reproducible.
    pub fn with_seed(gateway: Arc<dyn TextGenerationGateway>, seed: u64) -> Self {
        Self {
            gateway,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Whether the underlying gateway has a provider credential.
    pub fn is_gateway_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// The next coach utterance for `latest_user_text` given the session so far.
    ///
    /// Never fails: every gateway outcome maps to a usable reply.
    pub async fn next_utterance(
        &self,
        latest_user_text: &str,
        history: &[ConversationTurn],
        profile: &UserProfileContext,
    ) -> String {
        if !self.gateway.is_configured() {
            return UNAVAILABLE_REPLY.to_string();
        }

        let request = CompletionRequest::new(dialogue_prompt(latest_user_text, history, profile))
            .with_system_prompt(PERSONA_PROMPT)
            .with_temperature(0.7)
            .with_max_tokens(500);

        match self.gateway.complete(request).await {
            Ok(raw) => {
                let reply = raw.trim();
                if reply.is_empty() {
                    tracing::warn!("gateway returned empty coach reply");
                    self.pick(&SUPPORT_POOL)
                } else {
                    reply.to_string()
                }
            }
            Err(err) if err.is_configuration_problem() => {
                tracing::warn!(error = %err, "coach reply fell back (configuration)");
                CONFIG_ERROR_REPLY.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "coach reply fell back");
                self.pick(&SUPPORT_POOL)
            }
        }
    }

    /// The rule-based coaching reply: no gateway involved.
    ///
    /// Topics are checked in declaration order and the first keyword hit
    /// wins; unmatched input draws from the default pool.
    pub fn rule_based_reply(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        for (keywords, response) in TOPIC_RESPONSES.iter() {
            if keywords.iter().any(|kw| lowered.contains(kw)) {
                return (*response).to_string();
            }
        }
        self.pick(&DEFAULT_TOPIC_POOL)
    }

    fn pick(&self, pool: &[&str]) -> String {
        let mut rng = self.rng.lock().expect("rng lock poisoned");
        let index = rng.gen_range(0..pool.len());
        pool[index].to_string()
    }
}

/// The fixed reply used in the unconfigured state (exposed for tests).
pub fn unavailable_reply() -> &'static str {
    UNAVAILABLE_REPLY
}

/// The fixed reply used on configuration-classified call failures.
pub fn config_error_reply() -> &'static str {
    CONFIG_ERROR_REPLY
}

/// The transient-failure fallback pool (exposed for membership assertions).
pub fn support_pool() -> &'static [&'static str] {
    &SUPPORT_POOL
}

fn dialogue_prompt(
    latest_user_text: &str,
    history: &[ConversationTurn],
    profile: &UserProfileContext,
) -> String {
    let mut prompt = String::new();

    if let Some(fragment) = profile.prompt_fragment() {
        prompt.push_str(&fragment);
        prompt.push_str("\n\n");
    }

    let recent = if history.len() > HISTORY_WINDOW {
        &history[history.len() - HISTORY_WINDOW..]
    } else {
        history
    };
    if !recent.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for turn in recent {
            let speaker = match turn.speaker {
                Speaker::User => "User",
                Speaker::Coach => "Coach",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, turn.text));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("User: {}\n\nRespond as the coach.", latest_user_text));
    prompt
}
