use common::MonthKey;
use model::records::InstallmentCharge;
use rust_decimal::Decimal;

/// Months projected: the current one and the eleven after it.
pub const INVOICE_HORIZON: i32 = 12;

/// Unpaid installment totals per month over the horizon starting at
/// `current`. Months without anything due are left out.
pub fn future_invoices(installments: &[InstallmentCharge], current: MonthKey) -> Vec<(MonthKey, Decimal)> {
    (0..INVOICE_HORIZON)
        .map(|offset| {
            let month = current.offset(offset);
            let total: Decimal = installments
                .iter()
                .filter(|charge| !charge.paid && month.contains(charge.due_date))
                .map(|charge| charge.amount)
                .sum();
            (month, total)
        })
        .filter(|(_, total)| *total > Decimal::ZERO)
        .collect()
}
