use heck::ToTitleCase;
use indexmap::IndexMap;

use crate::openapi::{Tag, TagGroup};

/// Reserved tag for paths with no eligible segments.
const GENERAL_TAG: &str = "general";

/// Display overrides for vendor path segments that title-casing would
/// mangle. Everything else goes through hyphen/underscore title-case.
const DISPLAY_OVERRIDES: &[(&str, &str)] = &[
    ("access", "Access Control"),
    ("acl", "ACL"),
    ("apt", "APT"),
    ("dns", "DNS"),
    ("ha", "High Availability (HA)"),
    ("lxc", "Containers (LXC)"),
    ("qemu", "Virtual Machines (QEMU)"),
    ("sdn", "SDN"),
    ("tfa", "Two-Factor Authentication (TFA)"),
];

/// Top-level groups listed before all others, in this order. Remaining
/// groups sort alphabetically after them.
const GROUP_PRIORITY: &[&str] = &["access", "cluster", "nodes", "storage", "pools", "version"];

/// Tag identity derived from an endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Joined (≤2)-segment tag name, e.g. `nodes/storage`.
    pub name: String,
    /// First segment, used for top-level clustering.
    pub group: String,
    /// Human-readable rendering, e.g. `Nodes › Storage`.
    pub display_name: String,
}

/// Derive the tag for an endpoint from the first two non-parameter path
/// segments.
pub fn derive_tag(path: &str) -> TagInfo {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .take(2)
        .collect();

    if segments.is_empty() {
        return TagInfo {
            name: GENERAL_TAG.to_string(),
            group: GENERAL_TAG.to_string(),
            display_name: display_segment(GENERAL_TAG),
        };
    }

    TagInfo {
        name: segments.join("/"),
        group: segments[0].to_string(),
        display_name: segments
            .iter()
            .map(|segment| display_segment(segment))
            .collect::<Vec<_>>()
            .join(" › "),
    }
}

pub fn display_segment(segment: &str) -> String {
    for (key, display) in DISPLAY_OVERRIDES {
        if *key == segment {
            return (*display).to_string();
        }
    }
    segment.to_title_case()
}

/// Accumulates the tags seen while assembling operations and emits the
/// ordered `tags` + `x-tagGroups` sections.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: IndexMap<String, TagInfo>,
}

impl TagRegistry {
    pub fn register(&mut self, tag: &TagInfo) {
        self.tags
            .entry(tag.name.clone())
            .or_insert_with(|| tag.clone());
    }

    /// Consume the registry into the document's tag list and tag groups.
    ///
    /// Groups follow the fixed priority list, then alphabetical order; tags
    /// within a group sort alphabetically by display name.
    pub fn into_parts(self) -> (Vec<Tag>, Vec<TagGroup>) {
        let mut grouped: IndexMap<String, Vec<TagInfo>> = IndexMap::new();
        for (_, tag) in self.tags {
            grouped.entry(tag.group.clone()).or_default().push(tag);
        }

        let mut group_keys: Vec<String> = grouped.keys().cloned().collect();
        group_keys.sort_by(|a, b| group_rank(a).cmp(&group_rank(b)).then_with(|| a.cmp(b)));

        let mut tags = Vec::new();
        let mut tag_groups = Vec::new();

        for key in group_keys {
            let mut members = grouped.shift_remove(&key).unwrap_or_default();
            members.sort_by(|a, b| a.display_name.cmp(&b.display_name));

            tag_groups.push(TagGroup {
                name: display_segment(&key),
                tags: members.iter().map(|tag| tag.name.clone()).collect(),
            });

            for member in members {
                tags.push(Tag {
                    name: member.name,
                    description: Some(member.display_name.clone()),
                    display_name: member.display_name,
                });
            }
        }

        (tags, tag_groups)
    }
}

fn group_rank(group: &str) -> usize {
    GROUP_PRIORITY
        .iter()
        .position(|candidate| *candidate == group)
        .unwrap_or(GROUP_PRIORITY.len())
}
