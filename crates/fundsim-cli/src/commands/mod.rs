pub mod payroll;
pub mod risk;
pub mod simulate;
pub mod tax;
pub mod valuation;
