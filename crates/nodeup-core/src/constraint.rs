//! Version constraints declared by manifests
//!
//! A single manifest declares a Composer-style range expression:
//!
//! - comparisons: `>=8.0.0`, `<10`, `=6.11.2`, bare `6.11.2` (exact)
//! - wildcards: `*`, `8.*`, `8.x`
//! - caret and tilde ranges: `^8.9`, `~8.9` (`>=8.9.0 <9.0.0`), `~8.9.1`
//! - hyphen ranges: `8.0.0 - 10` (upper bound inclusive of the partial)
//! - comparisons against a series: `>=8.*`, `<=8.x`
//! - exclusions: `!=8.1.0`, `!=9.*`
//! - AND with a comma or whitespace, OR with `||` or `|`
//!
//! Constraints from several manifests are intersected structurally: each
//! manifest keeps its own OR-groups and a version must satisfy every
//! manifest. No string re-parsing happens when merging.

use regex::Regex;
use semver::{Version, VersionReq};
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::version::NodeVersion;

/// OR separator; Composer accepts both `||` and a single `|`
static OR_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\|?\s*").expect("OR separator regex is valid"));

/// One AND-group: the range must match and no excluded range may match
#[derive(Debug, Clone)]
struct Alternative {
    range: VersionReq,
    excluded: Vec<VersionReq>,
}

impl Alternative {
    fn matches(&self, version: &Version) -> bool {
        self.range.matches(version) && !self.excluded.iter().any(|req| req.matches(version))
    }
}

/// One manifest's constraint: a version must match at least one alternative
#[derive(Debug, Clone)]
struct Clause {
    source: String,
    alternatives: Vec<Alternative>,
}

/// An effective constraint: the intersection of zero or more declared ones
#[derive(Debug, Clone, Default)]
pub struct VersionConstraint {
    clauses: Vec<Clause>,
}

impl VersionConstraint {
    /// The wildcard constraint, satisfied by every version
    pub fn any() -> Self {
        Self::default()
    }

    /// Parse one declared constraint string
    pub fn parse(input: &str) -> Result<Self> {
        let source = input.trim();
        if source.is_empty() {
            return Err(Error::invalid_constraint(input, "constraint is empty"));
        }

        let alternatives = OR_SEPARATOR_RE
            .split(source)
            .map(|group| translate_group(group, source))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            clauses: vec![Clause {
                source: source.to_string(),
                alternatives,
            }],
        })
    }

    /// Intersect several constraints into one
    pub fn intersect<I>(constraints: I) -> Self
    where
        I: IntoIterator<Item = VersionConstraint>,
    {
        Self {
            clauses: constraints.into_iter().flat_map(|c| c.clauses).collect(),
        }
    }

    /// Add another constraint to this intersection
    pub fn and(mut self, other: VersionConstraint) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    /// True when no manifest restricts the version
    pub fn is_any(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check whether a version satisfies every clause
    pub fn matches(&self, version: &NodeVersion) -> bool {
        let version = version.to_semver();
        self.clauses
            .iter()
            .all(|clause| clause.alternatives.iter().any(|alt| alt.matches(&version)))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "*");
        }

        let sources: Vec<&str> = self.clauses.iter().map(|c| c.source.as_str()).collect();
        write!(f, "{}", sources.join(", "))
    }
}

impl std::str::FromStr for VersionConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!', '^', '~'];

/// A translated comparator: part of the range, or a range to exclude
enum Comparator {
    Range(String),
    Exclude(String),
}

/// Translate one AND-group into `semver` requirements
fn translate_group(group: &str, source: &str) -> Result<Alternative> {
    let tokens = tokenize(group);
    if tokens.is_empty() {
        return Err(Error::invalid_constraint(source, "empty range in alternative"));
    }

    let mut comparators = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens.get(i + 1).map(String::as_str) == Some("-") {
            let upper = tokens.get(i + 2).ok_or_else(|| {
                Error::invalid_constraint(source, "hyphen range has no upper bound")
            })?;
            comparators.push(Comparator::Range(format!(">={}", pad(strip_v(&tokens[i])))));
            // A partial upper bound covers the whole series, which is what
            // semver's `<=I.J` already means.
            comparators.push(Comparator::Range(format!("<={}", strip_v(upper))));
            i += 3;
            continue;
        }

        comparators.extend(translate_token(&tokens[i], source)?);
        i += 1;
    }

    let mut ranges = Vec::new();
    let mut excluded = Vec::new();
    for comparator in comparators {
        match comparator {
            Comparator::Range(range) if range == "*" => {}
            Comparator::Range(range) => ranges.push(range),
            Comparator::Exclude(range) => excluded.push(parse_req(&range, source)?),
        }
    }

    let range = if ranges.is_empty() {
        VersionReq::STAR
    } else {
        parse_req(&ranges.join(", "), source)?
    };

    Ok(Alternative { range, excluded })
}

fn parse_req(requirement: &str, source: &str) -> Result<VersionReq> {
    VersionReq::parse(requirement).map_err(|e| Error::invalid_constraint(source, e.to_string()))
}

/// Split on commas and whitespace, gluing detached operators to their version
fn tokenize(group: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_operator: Option<String> = None;

    for raw in group.split(|c: char| c == ',' || c.is_whitespace()) {
        if raw.is_empty() {
            continue;
        }

        if raw.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            pending_operator = Some(pending_operator.unwrap_or_default() + raw);
            continue;
        }

        match pending_operator.take() {
            Some(op) => tokens.push(format!("{}{}", op, raw)),
            None => tokens.push(raw.to_string()),
        }
    }

    if let Some(op) = pending_operator {
        tokens.push(op);
    }

    tokens
}

fn translate_token(token: &str, source: &str) -> Result<Vec<Comparator>> {
    // Stability flags (`@stable`, `@dev`) carry no meaning for Node.js releases
    let token = token.split('@').next().unwrap_or_default();
    if token.is_empty() {
        return Ok(vec![Comparator::Range("*".to_string())]);
    }

    let split_at = token
        .find(|c: char| !OPERATOR_CHARS.contains(&c))
        .unwrap_or(token.len());
    let (op, rest) = token.split_at(split_at);
    let rest = normalize_wildcards(strip_v(rest));

    if rest.is_empty() {
        return Err(Error::invalid_constraint(
            source,
            format!("operator '{}' has no version", op),
        ));
    }

    let is_wildcard = rest.contains('*');

    let translated = match op {
        "" | "=" | "==" if is_wildcard => vec![Comparator::Range(rest)],
        "" | "=" | "==" => vec![Comparator::Range(format!("={}", pad(&rest)))],
        "!=" | "<>" if is_wildcard => vec![Comparator::Exclude(rest)],
        "!=" | "<>" => vec![Comparator::Exclude(format!("={}", pad(&rest)))],
        ">=" | ">" | "<" | "<=" if is_wildcard => {
            vec![Comparator::Range(wildcard_bound(op, &rest, token, source)?)]
        }
        ">=" | ">" | "<" | "<=" => vec![Comparator::Range(format!("{}{}", op, pad(&rest)))],
        "^" => vec![Comparator::Range(format!("^{}", rest))],
        "~" => {
            let parts: Vec<&str> = rest.split('.').collect();
            if parts.len() == 2 {
                let major: u64 = parts[0].parse().map_err(|_| {
                    Error::invalid_constraint(source, format!("invalid tilde range '{}'", token))
                })?;
                vec![
                    Comparator::Range(format!(">={}.0", rest)),
                    Comparator::Range(format!("<{}.0.0", major + 1)),
                ]
            } else {
                vec![Comparator::Range(format!("~{}", rest))]
            }
        }
        other => {
            return Err(Error::invalid_constraint(
                source,
                format!("unsupported operator '{}'", other),
            ))
        }
    };

    Ok(translated)
}

/// Comparison against a whole series: `>=8.*` is `>=8.0.0`, `>8.*` is
/// `>=9.0.0`, `<8.*` is `<8.0.0` and `<=8.*` is `<9.0.0`
fn wildcard_bound(op: &str, series: &str, token: &str, source: &str) -> Result<String> {
    let prefix: Vec<&str> = series.split('.').take_while(|part| *part != "*").collect();

    if prefix.is_empty() {
        return match op {
            ">=" | "<=" => Ok("*".to_string()),
            _ => Err(Error::invalid_constraint(
                source,
                format!("'{}' matches no version", token),
            )),
        };
    }

    let lower = pad(&prefix.join("."));
    let upper = || -> Result<String> {
        let invalid = || Error::invalid_constraint(source, format!("invalid wildcard '{}'", token));
        let (last, leading) = prefix.split_last().ok_or_else(invalid)?;
        let last: u64 = last.parse().map_err(|_| invalid())?;
        let mut parts: Vec<String> = leading.iter().map(|part| part.to_string()).collect();
        parts.push((last + 1).to_string());
        Ok(pad(&parts.join(".")))
    };

    match op {
        ">=" => Ok(format!(">={}", lower)),
        "<" => Ok(format!("<{}", lower)),
        ">" => Ok(format!(">={}", upper()?)),
        _ => Ok(format!("<{}", upper()?)),
    }
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

fn normalize_wildcards(version: &str) -> String {
    version
        .split('.')
        .map(|part| match part {
            "x" | "X" => "*",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Pad a partial version with zero components (`8` -> `8.0.0`)
fn pad(version: &str) -> String {
    let count = version.split('.').count();
    let mut padded = version.to_string();
    for _ in count..3 {
        padded.push_str(".0");
    }
    padded
}
