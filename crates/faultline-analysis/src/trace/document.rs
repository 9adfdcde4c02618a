//! Streaming parse of the trace document.
//!
//! The document has a `program` section and a `test_suite` section,
//! each holding files; a file holds classes (with per-method signature
//! and start/end line markers) and a statement table mapping statement
//! ids to line numbers. Test cases carry a name, a passing flag, and
//! the ordered ids of the statements they executed. Element names are
//! matched by local name, so namespace prefixes are accepted.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use faultline_core::errors::TraceError;

/// One parsed trace document. Immutable for the whole run.
#[derive(Debug, Default)]
pub struct TraceDocument {
    /// Files of the production (`program`) section, in document order.
    pub program_files: Vec<FileRecord>,
    /// Files of the `test_suite` section, in document order.
    pub test_files: Vec<FileRecord>,
    /// Test cases, in document order.
    pub test_cases: Vec<TestCaseRecord>,
}

#[derive(Debug, Default)]
pub struct FileRecord {
    pub name: String,
    pub classes: Vec<ClassRecord>,
    /// File-level statement table: id to line number.
    pub statements: Vec<StatementRecord>,
}

#[derive(Debug, Default)]
pub struct ClassRecord {
    pub name: String,
    pub methods: Vec<MethodRecord>,
}

#[derive(Debug)]
pub struct MethodRecord {
    pub signature: String,
    pub start_line: u32,
    pub end_line: u32,
}

#[derive(Debug)]
pub struct StatementRecord {
    pub id: String,
    pub line: u32,
}

#[derive(Debug, Default)]
pub struct TestCaseRecord {
    pub name: String,
    pub passing: bool,
    /// Ids of executed statements, in execution order, duplicates kept.
    pub statement_ids: Vec<String>,
}

/// Which top-level section the parser is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Program,
    TestSuite,
}

/// In-progress method element.
#[derive(Debug, Default)]
struct MethodDraft {
    signature: Option<String>,
    start_line: Option<u32>,
    end_line: Option<u32>,
}

impl TraceDocument {
    /// Reads and parses the trace document at `path`.
    pub fn parse_file(path: &Path) -> Result<Self, TraceError> {
        let text = fs::read_to_string(path).map_err(|e| TraceError::DocumentUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse_str(&text, path)
    }

    /// Parses trace XML from a string; `path` is carried for error
    /// context only.
    pub fn parse_str(text: &str, path: &Path) -> Result<Self, TraceError> {
        let malformed = |message: &dyn Display| TraceError::Malformed {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let mut reader = Reader::from_str(text);
        let mut document = TraceDocument::default();

        let mut section = Section::None;
        let mut file: Option<FileRecord> = None;
        let mut class: Option<ClassRecord> = None;
        let mut method: Option<MethodDraft> = None;
        // File-level statement draft: id already read from the attribute.
        let mut statement: Option<(String, Option<u32>)> = None;
        let mut test_case: Option<TestCaseRecord> = None;
        let mut in_test_statement = false;
        let mut line_kind: Option<String> = None;
        let mut text_buf = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    text_buf.clear();
                    match e.local_name().as_ref() {
                        b"program" => section = Section::Program,
                        b"test_suite" => section = Section::TestSuite,
                        b"file" if section != Section::None => {
                            file = Some(FileRecord::default());
                        }
                        b"class" if file.is_some() => {
                            class = Some(ClassRecord::default());
                        }
                        b"method" if class.is_some() => {
                            method = Some(MethodDraft::default());
                        }
                        b"line" if method.is_some() => {
                            let kind = e
                                .try_get_attribute("type")
                                .map_err(|err| malformed(&err))?
                                .ok_or_else(|| malformed(&"method line without type attribute"))?;
                            let kind = kind.unescape_value().map_err(|err| malformed(&err))?;
                            line_kind = Some(kind.into_owned());
                        }
                        b"statement" => {
                            if test_case.is_some() {
                                in_test_statement = true;
                            } else if file.is_some() && class.is_none() {
                                let id = e
                                    .try_get_attribute("id")
                                    .map_err(|err| malformed(&err))?
                                    .ok_or_else(|| malformed(&"statement without id attribute"))?;
                                let id = id.unescape_value().map_err(|err| malformed(&err))?;
                                statement = Some((id.into_owned(), None));
                            }
                        }
                        b"test_case" => {
                            let name = e
                                .try_get_attribute("name")
                                .map_err(|err| malformed(&err))?
                                .ok_or_else(|| malformed(&"test_case without name attribute"))?
                                .unescape_value()
                                .map_err(|err| malformed(&err))?
                                .into_owned();
                            let passing = e
                                .try_get_attribute("passing")
                                .map_err(|err| malformed(&err))?
                                .ok_or_else(|| malformed(&"test_case without passing attribute"))?
                                .unescape_value()
                                .map_err(|err| malformed(&err))?
                                .parse::<bool>()
                                .map_err(|err| malformed(&err))?;
                            test_case = Some(TestCaseRecord {
                                name,
                                passing,
                                statement_ids: Vec::new(),
                            });
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(t)) => {
                    let chunk = t.unescape().map_err(|err| malformed(&err))?;
                    text_buf.push_str(&chunk);
                }
                Ok(Event::End(e)) => {
                    let text = text_buf.trim();
                    match e.local_name().as_ref() {
                        b"program" | b"test_suite" => section = Section::None,
                        b"name" => {
                            if let Some(class) = class.as_mut() {
                                class.name = text.to_string();
                            } else if let Some(file) = file.as_mut() {
                                file.name = text.to_string();
                            }
                        }
                        b"signature" => {
                            if let Some(method) = method.as_mut() {
                                method.signature = Some(text.to_string());
                            }
                        }
                        b"line" => {
                            let line: u32 = text.parse().map_err(|err| malformed(&err))?;
                            if let Some(method) = method.as_mut() {
                                match line_kind.take().as_deref() {
                                    Some("start") => method.start_line = Some(line),
                                    Some("end") => method.end_line = Some(line),
                                    other => {
                                        return Err(malformed(&format!(
                                            "unknown method line type {other:?}"
                                        )));
                                    }
                                }
                            } else if let Some(statement) = statement.as_mut() {
                                statement.1 = Some(line);
                            }
                        }
                        b"id" => {
                            if in_test_statement {
                                if let Some(test_case) = test_case.as_mut() {
                                    test_case.statement_ids.push(text.to_string());
                                }
                            }
                        }
                        b"method" => {
                            let draft = method
                                .take()
                                .ok_or_else(|| malformed(&"unexpected method end"))?;
                            let record = MethodRecord {
                                signature: draft
                                    .signature
                                    .ok_or_else(|| malformed(&"method without signature"))?,
                                start_line: draft
                                    .start_line
                                    .ok_or_else(|| malformed(&"method without start line"))?,
                                end_line: draft
                                    .end_line
                                    .ok_or_else(|| malformed(&"method without end line"))?,
                            };
                            if let Some(class) = class.as_mut() {
                                class.methods.push(record);
                            }
                        }
                        b"statement" => {
                            if in_test_statement {
                                in_test_statement = false;
                            } else if let Some((id, line)) = statement.take() {
                                let line =
                                    line.ok_or_else(|| malformed(&"statement without line"))?;
                                if let Some(file) = file.as_mut() {
                                    file.statements.push(StatementRecord { id, line });
                                }
                            }
                        }
                        b"class" => {
                            if let (Some(file), Some(done)) = (file.as_mut(), class.take()) {
                                file.classes.push(done);
                            }
                        }
                        b"file" => {
                            if let Some(done) = file.take() {
                                match section {
                                    Section::Program => document.program_files.push(done),
                                    Section::TestSuite => document.test_files.push(done),
                                    Section::None => {}
                                }
                            }
                        }
                        b"test_case" => {
                            if let Some(done) = test_case.take() {
                                document.test_cases.push(done);
                            }
                        }
                        _ => {}
                    }
                    text_buf.clear();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(malformed(&err)),
            }
        }

        Ok(document)
    }
}
