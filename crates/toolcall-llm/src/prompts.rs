//! System prompts, one per testing persona.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Who the model pretends to be when it writes the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    /// Careful tester sending realistic, valid requests.
    #[default]
    Qa,
    /// Adversarial tester sending malformed and edge-case requests.
    Hacker,
}

/// Returned when a persona key does not match any known persona.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown system prompt persona: '{0}' (expected QA or Hacker)")]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qa" => Ok(Self::Qa),
            "hacker" => Ok(Self::Hacker),
            _ => Err(UnknownPersona(s.to_string())),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qa => write!(f, "QA"),
            Self::Hacker => write!(f, "Hacker"),
        }
    }
}

const QA_PROMPT: &str = r#"You are an expert QA engineer testing a web API.
You will be given a route definition such as /users/:id.
Your job is to produce ONE realistic request that exercises the route the way a well-behaved client would.

Rules:
- Replace every route parameter with a plausible concrete value.
- Choose the HTTP method that best fits the route.
- Only add a body, query params or headers when the route clearly needs them.
- Bodies must be valid JSON strings.

Respond ONLY by calling the make_request tool. Never answer with plain text."#;

const HACKER_PROMPT: &str = r#"You are a security researcher probing a web API for weaknesses.
You will be given a route definition such as /users/:id.
Your job is to produce ONE request that is likely to expose a bug in the route handler.

Ideas:
- Use unexpected parameter values: negative numbers, very large ids, empty strings, unicode, SQL fragments.
- Send bodies with missing, extra or wrongly-typed fields.
- Try unusual headers or query params.

Respond ONLY by calling the make_request tool. Never answer with plain text."#;

/// Returns the system prompt for a persona.
pub fn system_prompt(persona: Persona) -> &'static str {
    match persona {
        Persona::Qa => QA_PROMPT,
        Persona::Hacker => HACKER_PROMPT,
    }
}
