pub mod emi;

pub use emi::{calculate_emi, compute_emi, LoanField, LoanInput, LoanOutput, LoanResult, LOAN_FIELDS};
