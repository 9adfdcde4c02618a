//! Grouping of query statements into logical query units.
//!
//! A group opens at the first matching statement and accumulates
//! matching statements until one classified `Executes` joins and
//! closes it. Non-matching lines never close a group: chained builder
//! continuations (a leading `.`) are pulled into the group, anything
//! else is ignored. A group still open at the end of the method is
//! kept as-is. Each group becomes one query keyed by its first line.

use smallvec::SmallVec;

use crate::model::types::{Query, Statement};

use super::rules::{QueryRuleKind, QueryRuleSet};

/// Identifies the queries of one method from its statements, given in
/// ascending line order.
pub fn identify_queries<'a>(
    class_name: &str,
    method_name: &str,
    statements: impl IntoIterator<Item = &'a Statement>,
    rules: &QueryRuleSet,
) -> Vec<Query> {
    let mut queries = Vec::new();
    let mut group: SmallVec<[Statement; 2]> = SmallVec::new();

    for statement in statements {
        match rules.classify(&statement.text) {
            Some(QueryRuleKind::Builds) => {
                group.push(statement.clone());
            }
            Some(QueryRuleKind::Executes) => {
                group.push(statement.clone());
                queries.push(Query::new(
                    class_name.to_string(),
                    method_name.to_string(),
                    std::mem::take(&mut group),
                ));
            }
            None => {
                if !group.is_empty() && is_builder_continuation(&statement.text) {
                    group.push(statement.clone());
                }
                // Other unmatched statements are ignored; the group
                // stays open until an execution call is seen.
            }
        }
    }

    if !group.is_empty() {
        queries.push(Query::new(
            class_name.to_string(),
            method_name.to_string(),
            group,
        ));
    }

    queries
}

/// A chained call continuing the statement above it.
fn is_builder_continuation(text: &str) -> bool {
    text.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(lines: &[(u32, &str)]) -> Vec<Statement> {
        lines
            .iter()
            .map(|&(line, text)| Statement {
                class_name: "ContactManager".to_string(),
                method_name: "findMatches".to_string(),
                line,
                text: text.to_string(),
            })
            .collect()
    }

    fn lines_of(query: &Query) -> Vec<u32> {
        query.statements().iter().map(|s| s.line).collect()
    }

    #[test]
    fn single_line_query_is_a_singleton_group() {
        let stmts = statements(&[
            (38, "public List<Contact> getContactsByEmail(String email) {"),
            (39, "return (List<Contact>) q.createQuery(hql).list();"),
            (40, "}"),
        ]);
        let queries =
            identify_queries("ContactManager", "findMatches", &stmts, &QueryRuleSet::hibernate());
        assert_eq!(queries.len(), 1);
        assert_eq!(lines_of(&queries[0]), vec![39]);
        assert_eq!(queries[0].starting_line(), 39);
    }

    #[test]
    fn group_spans_builder_lines_and_closes_on_execution() {
        let stmts = statements(&[
            (25, "Query query = session.createQuery(\"from Contact\");"),
            (26, "query.setString(\"forename\", forename);"),
            (27, "if (surname == null) {"),
            (28, "return runForenameOnly(query);"),
            (29, "}"),
            (30, "return (List<Contact>) query.setString(\"surname\", surname).list();"),
        ]);
        let queries =
            identify_queries("ContactManager", "findMatches", &stmts, &QueryRuleSet::hibernate());
        assert_eq!(queries.len(), 1);
        assert_eq!(lines_of(&queries[0]), vec![25, 26, 30]);
    }

    #[test]
    fn chained_continuation_lines_join_the_group() {
        let stmts = statements(&[
            (50, "List rows = session.createCriteria(Contact.class)"),
            (51, ".add(Restrictions.eq(\"surname\", surname))"),
            (52, ".list();"),
        ]);
        let queries =
            identify_queries("ContactManager", "findMatches", &stmts, &QueryRuleSet::hibernate());
        assert_eq!(queries.len(), 1);
        assert_eq!(lines_of(&queries[0]), vec![50, 51, 52]);
    }

    #[test]
    fn each_execution_call_closes_its_own_group() {
        let stmts = statements(&[
            (56, "matches.addAll(session.createQuery(a).list());"),
            (57, "}"),
            (60, "matches.addAll(session.createQuery(b).list());"),
            (63, "matches.addAll(session.createQuery(c).list());"),
        ]);
        let queries =
            identify_queries("ContactManager", "findMatches", &stmts, &QueryRuleSet::hibernate());
        let starts: Vec<u32> = queries.iter().map(|q| q.starting_line()).collect();
        assert_eq!(starts, vec![56, 60, 63]);
    }

    #[test]
    fn open_group_at_method_end_is_kept() {
        let stmts = statements(&[
            (70, "Query query = session.createQuery(\"from Contact\");"),
            (71, "query.setString(\"surname\", surname);"),
        ]);
        let queries =
            identify_queries("ContactManager", "findMatches", &stmts, &QueryRuleSet::hibernate());
        assert_eq!(queries.len(), 1);
        assert_eq!(lines_of(&queries[0]), vec![70, 71]);
    }

    #[test]
    fn plain_methods_have_no_queries() {
        let stmts = statements(&[(29, "this.playerList = playerList;")]);
        let queries =
            identify_queries("Game", "setPlayerList", &stmts, &QueryRuleSet::hibernate());
        assert!(queries.is_empty());
    }
}
