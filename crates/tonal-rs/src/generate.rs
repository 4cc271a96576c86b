//! Inference collaborator abstraction.
//!
//! A [`TextGenerator`] turns a prompt into model output. The service holds
//! exactly one, constructed at startup and shared behind an `Arc`, so the
//! request path never touches global state and tests can swap in a stub via
//! [`FnGenerator`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

/// Something that produces text from a prompt.
///
/// Errors are plain strings; callers surface them verbatim.
///
/// # Example
///
/// ```ignore
/// struct Echo;
///
/// impl TextGenerator for Echo {
///     fn name(&self) -> &str { "echo" }
///
///     fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
///         let prompt = prompt.to_string();
///         Box::pin(async move { Ok(prompt) })
///     }
/// }
/// ```
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Run the model on `prompt` and return its raw output.
    fn generate(&self, prompt: &str) -> GenerateFuture<'_>;
}

type ErasedHandler =
    Box<dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send>> + Send + Sync>;

/// A [`TextGenerator`] backed by a closure.
///
/// ```ignore
/// let stub = FnGenerator::new("stub", |_prompt| async {
///     Ok("Sentiment: Positive\nExplanation: The user expressed joy.".to_string())
/// });
/// ```
pub struct FnGenerator {
    name: String,
    handler: ErasedHandler,
}

impl FnGenerator {
    pub fn new<F, Fut>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, String>> + Send + 'static,
    {
        let erased = move |prompt: String| -> Pin<Box<dyn Future<Output = Result<String, String>> + Send>> {
            Box::pin(handler(prompt))
        };
        Self {
            name: name.into(),
            handler: Box::new(erased),
        }
    }

    /// A generator that always returns `output`.
    pub fn fixed(output: impl Into<String>) -> Self {
        let output = output.into();
        Self::new("fixed", move |_| {
            let output = output.clone();
            async move { Ok(output) }
        })
    }

    /// A generator that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new("failing", move |_| {
            let message = message.clone();
            async move { Err(message) }
        })
    }
}

impl TextGenerator for FnGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, prompt: &str) -> GenerateFuture<'_> {
        (self.handler)(prompt.to_string())
    }
}

impl fmt::Debug for FnGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator")
            .field("name", &self.name)
            .finish()
    }
}
