//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::AdvisorClient;
use crate::error::ClientError;
use crate::model::{AnalysisResult, SelectedImage};

/// Canned reply of the fake client.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Err(ClientError),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, ClientError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Err(e) => Err(e.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct Calls {
    analyzed: Vec<SelectedImage>,
    chatted: Vec<String>,
}

/// Client that answers with canned replies and records every call.
///
/// Clones share the call log, so a test can keep one clone and hand the
/// other to the app.
#[derive(Debug, Clone)]
pub struct FakeClient {
    analysis: Reply<AnalysisResult>,
    chat: Reply<String>,
    calls: Rc<RefCell<Calls>>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            analysis: Reply::Err(ClientError::Transport("no analysis reply configured".into())),
            chat: Reply::Err(ClientError::Transport("no chat reply configured".into())),
            calls: Rc::new(RefCell::new(Calls::default())),
        }
    }
}

impl FakeClient {
    pub fn with_analysis(mut self, reply: Reply<AnalysisResult>) -> Self {
        self.analysis = reply;
        self
    }

    pub fn with_chat(mut self, reply: Reply<String>) -> Self {
        self.chat = reply;
        self
    }

    /// Images uploaded so far.
    pub fn analyzed(&self) -> Vec<SelectedImage> {
        self.calls.borrow().analyzed.clone()
    }

    /// Chat messages sent so far.
    pub fn chatted(&self) -> Vec<String> {
        self.calls.borrow().chatted.clone()
    }
}

impl AdvisorClient for FakeClient {
    async fn analyze(&self, image: &SelectedImage) -> Result<AnalysisResult, ClientError> {
        self.calls.borrow_mut().analyzed.push(image.clone());
        self.analysis.to_result()
    }

    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        self.calls.borrow_mut().chatted.push(message.to_string());
        self.chat.to_result()
    }
}
