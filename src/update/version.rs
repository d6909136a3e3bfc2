//! Lenient version ordering for tag names
//!
//! A tag is read as `[v]<core>[-<pre-release>][+<build>]`. Core components
//! compare numerically with missing components treated as 0, so `v2.0` and
//! `v2.0.0` are the same version and `v1.10.0` sorts after `v1.9.2`. A
//! pre-release sorts before its release. Components that are not numbers
//! compare as text after all numbers.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Part {
    Num(u64),
    Text(String),
}

impl Part {
    fn parse(part: &str) -> Self {
        match part.parse::<u64>() {
            Ok(n) => Part::Num(n),
            Err(_) => Part::Text(part.to_string()),
        }
    }
}

#[derive(Debug)]
struct Version {
    core: Vec<Part>,
    pre: Option<Vec<Part>>,
}

impl Version {
    fn parse(tag: &str) -> Self {
        let tag = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);
        let tag = tag.split_once('+').map_or(tag, |(version, _build)| version);
        let (core, pre) = match tag.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (tag, None),
        };
        Self {
            core: core.split('.').map(Part::parse).collect(),
            pre: pre.map(|pre| pre.split('.').map(Part::parse).collect()),
        }
    }

    fn cmp_core(&self, other: &Self) -> Ordering {
        let zero = Part::Num(0);
        let len = self.core.len().max(other.core.len());
        (0..len)
            .map(|i| {
                let a = self.core.get(i).unwrap_or(&zero);
                let b = other.core.get(i).unwrap_or(&zero);
                a.cmp(b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_core(other).then_with(|| match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }
}

/// Whether a ref looks like a version tag (`v<digit>...` or `<digit>...`)
pub fn is_version_ref(git_ref: &str) -> bool {
    let rest = git_ref
        .strip_prefix('v')
        .or_else(|| git_ref.strip_prefix('V'))
        .unwrap_or(git_ref);
    rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Compare two tags by version only; `v2.0` and `2.0.0` are equal
pub fn version_order(a: &str, b: &str) -> Ordering {
    Version::parse(a).cmp(&Version::parse(b))
}

/// Total order for sorting: by version, then by plain string on ties
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    version_order(a, b).then_with(|| a.cmp(b))
}
