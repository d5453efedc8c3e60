//! Data-protection scenario: five missions covering phishing, data subject
//! rights, password hygiene, physical security, and incident response.

use super::{Scenario, question};
use crate::model::QuestionBank;

/// The full data-protection training scenario.
#[must_use]
pub fn data_protection() -> Scenario {
    let questions = vec![
        question(
            "m1",
            "You receive an email from 'IT Support <admin@fiducla.com>' with the subject \
             'URGENT: Verify your account now'. It asks you to click a link to verify \
             your password immediately or your account will be locked. What is your \
             immediate action?",
            &[
                "Click the link to verify quickly",
                "Reply to ask if it's real",
                "Report to the security team and delete it",
                "Forward it to your personal email to check later",
            ],
            2,
            "You noticed the spoofed domain 'fiducla.com' and the urgency tactics. \
             Always report suspicious emails directly.",
            "The domain was 'fiducla.com' (a typo) and the link was suspicious. Report \
             suspicious emails via the security team, never interact with them.",
        ),
        question(
            "m2",
            "A customer submits a subject access request asking for all their data to be \
             deleted. Their records include a marketing email subscription, customer \
             support chat logs, transaction history (tax invoices), and a shipping \
             address. What do you delete?",
            &[
                "Everything, exactly as the customer asked",
                "Only the marketing subscription",
                "Marketing subscription, chat logs, and shipping address; keep the tax \
                 invoices",
                "Nothing until the customer escalates",
            ],
            2,
            "The right balance: delete the personal data there is no need to keep, but \
             retain the legally required tax records (and explain that to the customer).",
            "Tax invoices must legally be kept for years and cannot be deleted on \
             request, while the remaining personal data should be removed.",
        ),
        question(
            "m3",
            "Company policy requires passwords with 12+ characters, mixed case, numbers, \
             and symbols. Which of these candidates meets the policy?",
            &[
                "summerholiday",
                "Fiducia123",
                "K7!mPa#xQ2vW9z",
                "PASSWORD2024",
            ],
            2,
            "Long and complex: mixed case, digits, and symbols across 14 characters.",
            "Only one candidate has the required length plus mixed case, digits, and \
             symbols.",
        ),
        question(
            "m4",
            "You are leaving for lunch. Your computer is unlocked showing customer data \
             and a confidential client list is lying on the desk. What do you do before \
             leaving?",
            &[
                "Just go, you'll be back in 10 minutes",
                "Lock the computer",
                "Lock the computer and put the confidential papers in a locked drawer",
                "Turn off the monitor",
            ],
            2,
            "Clean-desk policy adherence: you secured both digital and physical assets.",
            "Locking the screen alone still leaves confidential papers exposed; never \
             leave either your workstation or sensitive documents unattended.",
        ),
        question(
            "m5",
            "You accidentally sent a file containing 500 customer credit card numbers to \
             an external email address. What is your immediate action?",
            &[
                "Delete the email from your sent items",
                "Email the recipient and politely ask them to delete it",
                "Immediately report it to the Data Protection Officer / IT security",
                "Ignore it, maybe no one will notice",
            ],
            2,
            "Speed is key: the DPO needs to assess whether this is a reportable breach.",
            "Hiding it or relying on an unknown recipient is risky. Always report \
             internally immediately.",
        ),
    ];

    let bank = QuestionBank::new(questions).expect("built-in scenario content is valid");
    Scenario::new("data-protection", "Data Protection Training", bank)
}
