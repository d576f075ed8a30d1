//! Fixed bot copy shown by the widget.

/// First welcome message on the initial open.
pub const WELCOME: &str = "Welcome to your AI study assistant! I'm here to help you understand the course material better. Choose an option below to get started:";

/// Second welcome message, one line per menu option.
pub const MENU_OVERVIEW: &str = "• Q&A: Ask me any question about the lesson content.<br>• Summarize Lesson: Get a concise overview of the key points.<br>• Submit Feedback: Share your thoughts about the course.<br>• Request Assistance: Ask for help with any issues you're facing.";

pub const QA_PROMPT: &str =
    "Great! I'm ready to answer your questions about the lesson. What would you like to know?";

pub const FEEDBACK_PROMPT: &str =
    "I'd love to hear your thoughts about the course. Please type your feedback below.";

pub const ASSISTANCE_PROMPT: &str =
    "I'm here to help. What specific issue are you facing with the course material?";

pub const SUMMARIZE_PENDING: &str =
    "I'll summarize the lesson for you. Please give me a moment...";

/// Confirmation appended once the assistance endpoint accepts feedback.
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback! It has been submitted successfully.";

/// Fallback for any failed chat or feedback request.
pub const GENERIC_APOLOGY: &str = "Sorry, I encountered an error. Please try again later or contact support if the problem persists.";

/// Fallback for a failed summary request.
pub const SUMMARIZE_APOLOGY: &str = "Sorry, I encountered an error while summarizing the lesson. Please try again later or contact support if the problem persists.";

/// Header prefixed to every formatted summary.
pub const SUMMARY_HEADER: &str = "<strong>Key Concepts in Data Science:</strong><br><br>";
