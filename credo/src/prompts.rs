//! Fixed conversational copy: greeting, restart line, and the fallback system prompt.

/// Opening message of a fresh conversation; ends with the first field's question.
pub const GREETING: &str = "Hello! I'm your loan default risk assessment assistant. \
I'll help evaluate the default risk by asking some questions. First, what is your age?";

/// Reply to a restart token after a completed assessment.
pub const RESTART_GREETING: &str =
    "Great! Let's start a new default risk assessment. What is your age?";

/// System instruction scoping free-form fallback answers to loan/credit topics.
pub const LOAN_EXPERT_SYSTEM_PROMPT: &str = "You are a loan expert assistant. \
Answer questions about loans, lending, credit, and financial matters. \
Keep responses focused on loan-related topics.";
