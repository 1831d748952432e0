use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub status: String,
    pub transaction_id: Option<String>,
}

/// Simulated payment processing. Pure function, no external calls and no
/// persistence: whoever invokes it is responsible for writing the outcome
/// onto the order's payment columns. Not wired into order placement yet;
/// the intended integration point is still undecided upstream.
pub fn simulate_payment(method: &str, amount: f64) -> PaymentOutcome {
    match method {
        "UPI" => PaymentOutcome {
            status: "Paid".to_string(),
            // Amount in minor units; not a real transaction id scheme.
            transaction_id: Some(format!("UPI{}", (amount * 100.0) as i64)),
        },
        "COD" => PaymentOutcome {
            status: "Pending".to_string(),
            transaction_id: None,
        },
        _ => PaymentOutcome {
            status: "Failed".to_string(),
            transaction_id: None,
        },
    }
}
