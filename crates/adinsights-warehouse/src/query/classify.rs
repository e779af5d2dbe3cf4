//  Copyright (c) 2026 Metaform Systems, Inc
//
//  This program and the accompanying materials are made available under the
//  terms of the Apache License, Version 2.0 which is available at
//  https://www.apache.org/licenses/LICENSE-2.0
//
//  SPDX-License-Identifier: Apache-2.0
//
//  Contributors:
//       Metaform Systems, Inc. - initial API and implementation
//

use super::{QueryError, QueryErrorKind};
use serde_json::Value;

pub const PROJECT_SETUP_MESSAGE: &str = "You need to set up your own Google Cloud Project with billing enabled. \
The public dataset requires you to run queries from your own project.";

/// How the warehouse message is turned into the classified message.
#[derive(Debug, Clone, Copy)]
pub enum MessageTemplate {
    Verbatim,
    Prefixed(&'static str),
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// The rule applies when the message contains any of these substrings.
    pub patterns: &'static [&'static str],
    pub kind: QueryErrorKind,
    pub template: MessageTemplate,
}

/// Evaluated top to bottom; the first matching rule wins.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        patterns: &["User does not have"],
        kind: QueryErrorKind::PermissionError,
        template: MessageTemplate::Verbatim,
    },
    ClassificationRule {
        patterns: &["Access Denied"],
        kind: QueryErrorKind::PermissionError,
        template: MessageTemplate::Verbatim,
    },
    ClassificationRule {
        patterns: &["billing", "Billing"],
        kind: QueryErrorKind::ProjectSetupError,
        template: MessageTemplate::Fixed(PROJECT_SETUP_MESSAGE),
    },
    ClassificationRule {
        patterns: &["not found", "Not found"],
        kind: QueryErrorKind::ApiError,
        template: MessageTemplate::Prefixed("Table or dataset not found - "),
    },
    ClassificationRule {
        patterns: &["Unrecognized name", "invalidQuery"],
        kind: QueryErrorKind::ApiError,
        template: MessageTemplate::Prefixed("Invalid query - "),
    },
    ClassificationRule {
        patterns: &["Request is missing required authentication credential"],
        kind: QueryErrorKind::NotAuthenticated,
        template: MessageTemplate::Verbatim,
    },
    ClassificationRule {
        patterns: &["Invalid Credentials"],
        kind: QueryErrorKind::AuthenticationFailed,
        template: MessageTemplate::Verbatim,
    },
];

/// Classifies a warehouse error message reported with `code`.
pub fn classify_message(code: i64, message: &str) -> QueryError {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|pattern| message.contains(pattern)))
        .map(|rule| {
            let text = match rule.template {
                MessageTemplate::Verbatim => message.to_string(),
                MessageTemplate::Prefixed(prefix) => format!("{}{}", prefix, message),
                MessageTemplate::Fixed(fixed) => fixed.to_string(),
            };
            QueryError::classified(rule.kind, text)
        })
        .unwrap_or_else(|| QueryError::classified(QueryErrorKind::ApiError, format!("{} - {}", code, message)))
}

/// Classifies a non-success response from its status and raw body.
pub fn classify_failure(status: u16, body: &str) -> QueryError {
    let error = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|parsed| parsed.get("error").filter(|e| e.is_object()).cloned());

    match error {
        Some(error) => {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown BigQuery error");
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(i64::from(status));
            classify_message(code, message)
        }
        None => QueryError::classified(QueryErrorKind::ApiError, format!("{} - {}", status, body)),
    }
}
