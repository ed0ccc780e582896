use std::fmt;

use bookstore_client::{ClientError, ClientResult};
use bookstore_types::money::same_amount;
use rust_decimal::Decimal;
use thiserror::Error;

/// One observable step of the reset phase or the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResetOrders,
    ResetBooks,
    SeedBook,
    CreateOrder,
    VerifyStock,
    UpdateStatus,
    DeleteOrder,
    VerifyDeletion,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ResetOrders => "reset orders",
            Step::ResetBooks => "reset books",
            Step::SeedBook => "seed book",
            Step::CreateOrder => "create order",
            Step::VerifyStock => "verify stock",
            Step::UpdateStatus => "update status",
            Step::DeleteOrder => "delete order",
            Step::VerifyDeletion => "verify deletion",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("step `{step}` failed: {source}")]
    Client {
        step: Step,
        #[source]
        source: ClientError,
    },

    #[error("step `{step}`: {field} expected {expected}, got {actual}")]
    Mismatch {
        step: Step,
        field: &'static str,
        expected: String,
        actual: String,
    },
}

impl ScenarioError {
    pub fn step(&self) -> Step {
        match self {
            ScenarioError::Client { step, .. } | ScenarioError::Mismatch { step, .. } => *step,
        }
    }
}

pub(crate) trait AtStep<T> {
    fn at(self, step: Step) -> Result<T, ScenarioError>;
}

impl<T> AtStep<T> for ClientResult<T> {
    fn at(self, step: Step) -> Result<T, ScenarioError> {
        self.map_err(|source| ScenarioError::Client { step, source })
    }
}

pub(crate) fn ensure_eq<T>(
    step: Step,
    field: &'static str,
    expected: T,
    actual: T,
) -> Result<(), ScenarioError>
where
    T: PartialEq + fmt::Debug,
{
    if expected == actual {
        return Ok(());
    }
    Err(ScenarioError::Mismatch {
        step,
        field,
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}

/// A wire amount must equal `expected` exactly; sub-cent drift is a mismatch.
pub(crate) fn ensure_amount(
    step: Step,
    field: &'static str,
    expected: Decimal,
    actual: f64,
) -> Result<(), ScenarioError> {
    if same_amount(expected, actual) {
        return Ok(());
    }
    Err(ScenarioError::Mismatch {
        step,
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}
