//! Prompt templates for the dialog flow.
//!
//! All prompts the engine sends to a text generator are built here, from
//! transcript state and agent personas. The templates are deliberately
//! small: a dialog block, a role block and a one-line task. Reply
//! prompts all end in `Response:` (greetings in `Greeting:`) so that a
//! completion-style model continues in the right voice and the cleanup
//! pass can strip an echoed prompt by exact prefix.

use crate::core::SpeakerId;
use crate::dialog::agent::AgentProfile;
use crate::dialog::transcript::Transcript;

/// Templates for every generated turn in a dialog run.
pub struct DialogPrompts;

impl DialogPrompts {
    /// Scene-setting prompt naming all participants.
    pub fn scene(participants: &[&str]) -> String {
        format!(
            "Generate a concise scene description for: {}",
            participants.join(", ")
        )
    }

    /// One-off greeting prompt, anchored to the scene description.
    pub fn greeting(scene: &str, agent: &AgentProfile) -> String {
        format!(
            "Scene: {scene}\n# role: {name}\n{role}\n# task: Greet briefly.\nGreeting:",
            name = agent.id(),
            role = agent.role(),
        )
    }

    /// Answer an open question.
    pub fn confirm(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "{}# task: Answer clearly.\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// Contribute a short supportive remark.
    pub fn support(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "{}# task: Provide a short supportive comment.\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// Introduce the given topic as the new subject.
    pub fn introduce_topic(transcript: &Transcript, agent: &AgentProfile, topic: &str) -> String {
        format!(
            "{}# task: Introduce new topic: {topic}.\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// Wind the conversation down once an agent has no topics left.
    pub fn closing(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "{}# task: Provide a polite closing.\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// React to others signaling that the conversation should end.
    pub fn reflect_end(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "{}# task: Reflect briefly if it's time to end; you may stay silent or offer a short thought.\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// Summarize and ask the group to commit.
    pub fn summary(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "{}# task: Provide a concise summary and ask everyone to commit: 'So you are saying, that ...?'\nResponse:",
            Self::reply_header(transcript, agent)
        )
    }

    /// Put a direct question to one participant, or to the group when
    /// there is nobody to single out.
    pub fn probe(transcript: &Transcript, agent: &AgentProfile, target: Option<&SpeakerId>) -> String {
        let addressee = match target {
            Some(t) => t.as_str(),
            None => "the group",
        };
        format!(
            "{}# task: Ask a direct probing question to {addressee}. Response:",
            Self::reply_header(transcript, agent)
        )
    }

    fn reply_header(transcript: &Transcript, agent: &AgentProfile) -> String {
        format!(
            "# dialog:\n{dialog}\n# role: {name}\n{role}\n",
            dialog = transcript.to_plain_text(),
            name = agent.id(),
            role = agent.role(),
        )
    }
}
