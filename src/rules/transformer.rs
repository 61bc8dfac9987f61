#![forbid(unsafe_code)]

//! Transformer trait and composite (alias) transformers

use crate::error::TransformError;
use crate::types::FieldHandle;
use std::fmt;
use std::sync::Arc;

/// A named operation applied to one field value
///
/// Implementations must be idempotent and must treat a field kind they do not
/// support as a successful no-op rather than a failure. The trait is
/// `Send + Sync` so that one registry can be shared across threads.
pub trait Transformer: Send + Sync {
    /// Transforms the value behind `field` in place
    ///
    /// `rule` is the name the transformer was invoked under and `argument` the
    /// text after `=` in the rule token (empty when omitted).
    fn transform(
        &self,
        field: &mut FieldHandle<'_>,
        rule: &str,
        argument: &str,
    ) -> Result<(), TransformError>;
}

impl<F> Transformer for F
where
    F: Fn(&mut FieldHandle<'_>, &str, &str) -> Result<(), TransformError> + Send + Sync,
{
    fn transform(
        &self,
        field: &mut FieldHandle<'_>,
        rule: &str,
        argument: &str,
    ) -> Result<(), TransformError> {
        self(field, rule, argument)
    }
}

/// One resolved step of an alias chain
#[derive(Clone)]
pub struct AliasStep {
    pub name: String,
    pub argument: String,
    pub transformer: Arc<dyn Transformer>,
}

impl fmt::Debug for AliasStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasStep")
            .field("name", &self.name)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

/// A transformer that runs a fixed chain of other transformers
///
/// The chain is resolved when the alias is built, so later registrations under
/// the same names do not change what an existing alias does.
#[derive(Debug, Clone)]
pub struct AliasTransformer {
    steps: Vec<AliasStep>,
}

impl AliasTransformer {
    pub fn new(steps: Vec<AliasStep>) -> Self {
        Self { steps }
    }

    /// The resolved steps, in execution order
    pub fn steps(&self) -> &[AliasStep] {
        &self.steps
    }
}

impl Transformer for AliasTransformer {
    fn transform(
        &self,
        field: &mut FieldHandle<'_>,
        _rule: &str,
        _argument: &str,
    ) -> Result<(), TransformError> {
        for step in &self.steps {
            step.transformer
                .transform(field, &step.name, &step.argument)?;
        }
        Ok(())
    }
}
