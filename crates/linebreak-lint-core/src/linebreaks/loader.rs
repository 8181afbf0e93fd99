//! DTO → policy conversion with validation.

use crate::config::{ConfigError, RuleConfig};

use super::classify::StatementType;
use super::config_dto::{SpecDto, StatementsDto, STATEMENTS_KEY};
use super::policy::{Policy, PolicyRule, Requirement, TypeSpec};

/// Errors while turning configuration into a [`Policy`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The option could not be deserialized at all.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An entry does not have exactly three elements.
    #[error("statements[{index}]: expected [requirement, prev, next], found {len} element(s)")]
    Arity {
        /// Entry index.
        index: usize,
        /// Actual element count.
        len: usize,
    },

    /// The first element of an entry is a list.
    #[error("statements[{index}][0]: requirement must be a string")]
    RequirementNotString {
        /// Entry index.
        index: usize,
    },

    /// Unknown requirement name.
    #[error("{context}: unknown requirement `{value}`, expected: any, never, always, blankline")]
    UnknownRequirement {
        /// Where the error occurred (e.g., "statements[0][0]").
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown statement type name.
    #[error("{context}: unknown statement type `{value}` (see `linebreak-lint list-types`)")]
    UnknownStatementType {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A statement type list with no elements.
    #[error("{context}: statement type list must not be empty")]
    EmptyTypeList {
        /// Where the error occurred.
        context: String,
    },

    /// A statement type listed twice.
    #[error("{context}: statement type `{value}` is listed more than once")]
    DuplicateStatementType {
        /// Where the error occurred.
        context: String,
        /// The repeated value.
        value: String,
    },
}

/// Reads the `statements` option of a rule configuration.
///
/// A missing option yields an empty policy.
///
/// # Errors
///
/// Returns an error if the option is malformed.
pub fn load_rule_config(config: &RuleConfig) -> Result<Policy, LoadError> {
    let dto: StatementsDto = config.parse_option(STATEMENTS_KEY)?.unwrap_or_default();
    load(dto)
}

/// Converts raw entries into a validated [`Policy`].
///
/// # Errors
///
/// Returns the first error encountered, in entry order.
pub fn load(dto: StatementsDto) -> Result<Policy, LoadError> {
    dto.into_iter()
        .enumerate()
        .map(|(i, entry)| convert_entry(entry, i))
        .collect::<Result<Vec<_>, _>>()
        .map(Policy::new)
}

fn convert_entry(entry: Vec<SpecDto>, index: usize) -> Result<PolicyRule, LoadError> {
    let [requirement, prev, next]: [SpecDto; 3] =
        entry.try_into().map_err(|e: Vec<SpecDto>| LoadError::Arity {
            index,
            len: e.len(),
        })?;

    let SpecDto::Name(name) = requirement else {
        return Err(LoadError::RequirementNotString { index });
    };
    let requirement = name
        .parse::<Requirement>()
        .map_err(|_| LoadError::UnknownRequirement {
            context: format!("statements[{index}][0]"),
            value: name.clone(),
        })?;

    Ok(PolicyRule {
        requirement,
        prev: convert_spec(prev, &format!("statements[{index}][1]"))?,
        next: convert_spec(next, &format!("statements[{index}][2]"))?,
    })
}

fn convert_spec(dto: SpecDto, context: &str) -> Result<TypeSpec, LoadError> {
    match dto {
        SpecDto::Name(name) => parse_type(&name, context).map(TypeSpec::Single),
        SpecDto::Names(names) => {
            if names.is_empty() {
                return Err(LoadError::EmptyTypeList {
                    context: context.to_string(),
                });
            }
            let mut types = Vec::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let ty = parse_type(name, &format!("{context}[{i}]"))?;
                if types.contains(&ty) {
                    return Err(LoadError::DuplicateStatementType {
                        context: context.to_string(),
                        value: name.clone(),
                    });
                }
                types.push(ty);
            }
            Ok(TypeSpec::AnyOf(types))
        }
    }
}

fn parse_type(name: &str, context: &str) -> Result<StatementType, LoadError> {
    name.parse().map_err(|_| LoadError::UnknownStatementType {
        context: context.to_string(),
        value: name.to_string(),
    })
}
