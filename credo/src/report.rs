//! Assessment report rendering.
//!
//! Markdown-ish plain text: headline label, then personal / loan / credit sections
//! echoing every collected input, then the restart footer.

use crate::record::{LoanRecord, PriorDefault, RiskLabel};

/// Renders the completed assessment for display.
pub fn render(record: &LoanRecord, label: RiskLabel) -> String {
    let headline = match label {
        RiskLabel::High => "🔴 High Default Risk",
        RiskLabel::Low => "🟢 Low Default Risk",
    };
    let prior_defaults = match record.cb_person_default_on_file {
        PriorDefault::Yes => "Yes",
        PriorDefault::No => "No",
    };

    format!(
        "📊 **Default Risk Assessment Results**\n\
        \n\
        {headline}\n\
        \n\
        ### Personal Details\n\
        - Age: {age} years\n\
        - Income: ${income}\n\
        - Home Ownership: {ownership}\n\
        - Employment Length: {emp} years\n\
        \n\
        ### Loan Details\n\
        - Loan Amount: ${amount}\n\
        - Interest Rate: {rate}%\n\
        - Loan Purpose: {intent}\n\
        - Loan Grade: {grade}\n\
        \n\
        ### Credit Details\n\
        - Prior Defaults: {prior_defaults}\n\
        - Credit History Length: {hist} years\n\
        - Loan as % of Income: {ratio:.1}%\n\
        \n\
        Would you like to assess another loan scenario? Say 'yes' to start over, \
        or feel free to ask any loan-related questions!",
        age = record.person_age,
        income = thousands(record.person_income),
        ownership = record.person_home_ownership,
        emp = record.person_emp_length,
        amount = thousands(record.loan_amnt),
        rate = record.loan_int_rate,
        intent = record.loan_intent,
        grade = record.loan_grade,
        hist = record.cb_person_cred_hist_length,
        ratio = record.loan_percent_income,
    )
}

/// Formats an amount with comma thousands separators (50000 -> "50,000").
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HomeOwnership, LoanGrade, LoanIntent};

    fn record() -> LoanRecord {
        LoanRecord {
            person_age: 30,
            person_income: 50_000,
            person_home_ownership: HomeOwnership::Rent,
            person_emp_length: 5,
            loan_intent: LoanIntent::Personal,
            loan_grade: LoanGrade::B,
            loan_amnt: 10_000,
            loan_int_rate: 11.5,
            cb_person_default_on_file: PriorDefault::No,
            cb_person_cred_hist_length: 8,
            loan_percent_income: 20.0,
        }
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(50_000), "50,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn report_echoes_every_input() {
        let text = render(&record(), RiskLabel::Low);
        assert!(text.contains("🟢 Low Default Risk"));
        assert!(text.contains("Age: 30 years"));
        assert!(text.contains("Income: $50,000"));
        assert!(text.contains("Home Ownership: RENT"));
        assert!(text.contains("Loan Amount: $10,000"));
        assert!(text.contains("Interest Rate: 11.5%"));
        assert!(text.contains("Loan Purpose: PERSONAL"));
        assert!(text.contains("Loan Grade: B"));
        assert!(text.contains("Prior Defaults: No"));
        assert!(text.contains("Credit History Length: 8 years"));
        assert!(text.contains("Loan as % of Income: 20.0%"));
    }

    #[test]
    fn high_risk_headline() {
        let text = render(&record(), RiskLabel::High);
        assert!(text.contains("🔴 High Default Risk"));
    }

    #[test]
    fn ratio_is_rendered_to_one_decimal() {
        let mut r = record();
        r.loan_percent_income = 33.333_333;
        let text = render(&r, RiskLabel::Low);
        assert!(text.contains("33.3%"));
    }

    #[test]
    fn footer_offers_restart() {
        let text = render(&record(), RiskLabel::Low);
        assert!(text.contains("Say 'yes' to start over"));
    }
}
