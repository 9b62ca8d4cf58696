// Mount table entries parsed from configuration

/*
    * A mount table is a comma-separated list of `/prefix=group[:visibility]`
    * entries, e.g. `/users=users:public,/refunds=refunds:private`.
    * Visibility defaults to public when omitted.
*/

use std::str::FromStr;
use anyhow::{anyhow, bail, Context, Result};

use crate::routing::Visibility;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    pub prefix: String,
    pub group: String,
    pub visibility: Visibility,
}

impl MountConfig {
    pub fn new(prefix: &str, group: &str, visibility: Visibility) -> Self {
        Self {
            prefix: prefix.to_string(),
            group: group.to_string(),
            visibility,
        }
    }

    /// The stock mount table: users and sessions public, refunds private
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("/users", "users", Visibility::Public),
            Self::new("/sessions", "sessions", Visibility::Public),
            Self::new("/refunds", "refunds", Visibility::Private),
        ]
    }
}

impl FromStr for MountConfig {
    type Err = anyhow::Error;

    fn from_str(entry: &str) -> Result<Self> {
        let (prefix, target) = entry
            .split_once('=')
            .with_context(|| format!("Mount entry `{entry}` is missing `=`"))?;

        let (group, visibility) = match target.split_once(':') {
            Some((group, visibility)) => (
                group,
                visibility.parse::<Visibility>().map_err(|e| anyhow!(e))?,
            ),
            None => (target, Visibility::default()),
        };

        let prefix: &str = prefix.trim();
        let group: &str = group.trim();

        if prefix.is_empty() {
            bail!("Mount entry `{entry}` has an empty prefix");
        }
        if group.is_empty() {
            bail!("Mount entry `{entry}` has an empty group name");
        }

        Ok(Self::new(prefix, group, visibility))
    }
}

/// Parses a full mount table, skipping blank entries
pub fn parse_mount_table(raw: &str) -> Result<Vec<MountConfig>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry: &&str| !entry.is_empty())
        .map(str::parse::<MountConfig>)
        .collect()
}
