//! Plain-text diagnostic letter for the development team.

use std::fmt::Write;

use super::engine::QuerySuspiciousness;

/// Renders the diagnostic letter for one application.
pub fn render(application: &str, suspicious: &[QuerySuspiciousness]) -> String {
    let mut out = String::new();
    let _ = write!(out, "Dear {application} Development Team,\n\n");

    if suspicious.is_empty() {
        out.push_str("There are no suspicious queries on this application at present.\n\n");
    } else {
        let _ = write!(
            out,
            "There are {} suspicious queries for this application.  Details are given below:\n\n",
            suspicious.len()
        );
        for entry in suspicious {
            let _ = writeln!(
                out,
                "\t Query at {}, {}, {} has suspiciousness score {:.2}.",
                entry.query.class_name,
                entry.query.method_name,
                entry.query.starting_line(),
                entry.score
            );
        }
        out.push('\n');
    }

    out.push_str("Yours sincerely,\n\nThe Automation Team\n");
    out
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::model::types::{Query, Statement};

    use super::*;

    fn entry(class: &str, method: &str, line: u32, score: f64) -> QuerySuspiciousness {
        QuerySuspiciousness {
            query: Query::new(
                class.to_string(),
                method.to_string(),
                smallvec![Statement {
                    class_name: class.to_string(),
                    method_name: method.to_string(),
                    line,
                    text: String::new(),
                }],
            ),
            score,
            passed_executions: 0,
            failed_executions: 1,
        }
    }

    #[test]
    fn letter_without_suspicious_queries() {
        let letter = render("Contacts", &[]);
        assert_eq!(
            letter,
            "Dear Contacts Development Team,\n\n\
             There are no suspicious queries on this application at present.\n\n\
             Yours sincerely,\n\nThe Automation Team\n"
        );
    }

    #[test]
    fn letter_lists_ranked_queries() {
        let letter = render(
            "Contacts",
            &[
                entry("ContactManager", "getContactsByEmail", 39, 1.0),
                entry("ContactManager", "getContactsByFullName", 25, 0.6),
            ],
        );
        assert!(letter.starts_with("Dear Contacts Development Team,\n\n"));
        assert!(letter.contains("There are 2 suspicious queries for this application."));
        assert!(letter.contains(
            "\t Query at ContactManager, getContactsByEmail, 39 has suspiciousness score 1.00.\n"
        ));
        assert!(letter.contains(
            "\t Query at ContactManager, getContactsByFullName, 25 has suspiciousness score 0.60.\n"
        ));
        assert!(letter.ends_with("Yours sincerely,\n\nThe Automation Team\n"));
    }
}
