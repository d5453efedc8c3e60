//! Factoring-law scenario: ten questions on financing types, risk, and the
//! legal mechanics of receivables assignment.

use super::{Scenario, question};
use crate::model::QuestionBank;

/// The full factoring-law training scenario.
#[must_use]
pub fn factoring_law() -> Scenario {
    let questions = vec![
        question(
            "q1",
            "Peter wants to fulfil a big order but doesn't have enough money to produce \
             the goods. He takes financing to buy raw materials before delivering the \
             order. What type of financing is he using?",
            &[
                "Factoring",
                "Purchase Order Financing (PO Financing)",
                "Invoice Discounting",
                "Trade Credit",
            ],
            1,
            "PO Financing is used to pay for goods/materials before the order is fulfilled.",
            "This scenario describes financing before delivery to produce goods, which is \
             PO Financing.",
        ),
        question(
            "q2",
            "A supplier uploads an invoice that has already been financed elsewhere. \
             What type of risk is this?",
            &[
                "Weather risk",
                "Fraud risk",
                "Operational risk",
                "Payment timing risk",
            ],
            1,
            "Double financing is a deliberate act of deception, constituting fraud.",
            "Deliberately financing the same invoice twice is fraud.",
        ),
        question(
            "q3",
            "What is the main purpose of factoring?",
            &[
                "To delay supplier payments",
                "To convert invoices into immediate cash",
                "To increase product prices",
                "To extend credit to buyers",
            ],
            1,
            "Factoring provides immediate liquidity against outstanding invoices.",
            "The primary goal is to improve cash flow by converting receivables to cash.",
        ),
        question(
            "q4",
            "A buyer receives notice that Supplier A has assigned their receivable to \
             Factor X. Who should the buyer pay?",
            &[
                "Supplier A",
                "Supplier's accountant",
                "Factor X",
                "Anyone they want",
            ],
            2,
            "Once notified of assignment, the debtor (buyer) must pay the factor directly.",
            "After assignment notification, payment must go to the factor.",
        ),
        question(
            "q5",
            "What makes factoring different from a loan?",
            &[
                "It is based on invoices, not the supplier's creditworthiness",
                "It requires no documentation",
                "It has no risk",
                "It lasts for many years",
            ],
            0,
            "Factoring relies primarily on the credit quality of the debtor (invoice \
             payer), not the supplier.",
            "Factoring is an asset-based transaction (purchasing receivables), not a loan \
             based on the supplier's credit.",
        ),
        question(
            "q6",
            "Before uploading an invoice to the bidding platform, it is checked against \
             an invoice registry to see whether it has already been financed. Which \
             feature of an invoice registry does this represent?",
            &[
                "Making graphics",
                "Preventing double financing",
                "Sending marketing emails",
                "Paying suppliers",
            ],
            1,
            "Registries are crucial for ensuring an invoice hasn't already been pledged \
             or sold.",
            "The registry's primary risk function here is to stop double financing.",
        ),
        question(
            "q7",
            "A factor is analyzing whether the buyer (debtor) usually pays on time before \
             deciding to finance an invoice. What risk is being assessed?",
            &["Credit risk", "Market risk", "Fashion risk", "Weather risk"],
            0,
            "Credit risk assesses the debtor's ability and willingness to pay on time.",
            "This is credit risk: the risk of non-payment or late payment by the debtor.",
        ),
        question(
            "q8",
            "A business wants to use its receivable as collateral but still wants to \
             collect payments itself from the buyer. What is this called?",
            &[
                "Factoring",
                "Invoice Discounting",
                "Trade Credit",
                "PO Financing",
            ],
            1,
            "In invoice discounting, the business retains control of the sales ledger \
             and collection process.",
            "In factoring, the factor usually collects. Invoice discounting allows the \
             business to collect.",
        ),
        question(
            "q9",
            "In a factoring transaction, which party receives money immediately?",
            &["Buyer", "Supplier (Seller)", "Factor", "Central Bank"],
            1,
            "The supplier receives the advance from the factor.",
            "The supplier (seller) is the one getting financing.",
        ),
        question(
            "q10",
            "A supplier mistakenly enters the wrong invoice amount, and the factor \
             advances too much money. What type of risk does this represent?",
            &["Risk of rain", "Fraud risk", "Operational risk", "Credit risk"],
            2,
            "Errors in processing, data entry, or systems are classified as operational \
             risk.",
            "Since it was a mistake (not intentional), it is operational risk, not fraud.",
        ),
    ];

    let bank = QuestionBank::new(questions).expect("built-in scenario content is valid");
    Scenario::new("factoring-law", "Factoring Law Training", bank)
}
