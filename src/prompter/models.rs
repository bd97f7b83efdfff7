use crate::core::types::{JobType, Urgency};
use crate::errors::Result;

pub enum FlowCtrl {
    Continue,
    Finish,
}

pub trait Flow {
    fn render(&mut self) -> Result<()>;
    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl>;
}

#[derive(Debug, Clone)]
pub enum ConfigState {
    ShowTable,   // show the config table and ask Y/N
    SelectId,    // ask for ID
    ShowCurrent, // show desc/current
    AskNewValue, // prompt for new value, then save it
    Done,        // end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editing name, type and urgency.
    Form,
    /// Waiting on the quote worker; input is not read.
    Loading,
    /// Quote on screen; confirm or cancel.
    Quote,
    Done,
}

/// What the user has typed into the submission form so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub name: String,
    pub job_type: Option<JobType>,
    pub urgency: Urgency,
}
