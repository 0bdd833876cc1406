//! # Browser tree builder
//!
//! [`BrowserTreeBuilder`](crate::builder::BrowserTreeBuilder) turns flat catalog query results into
//! [`BrowserNode`](crate::node::BrowserNode) trees. It builds the three browser roots and the
//! on-demand satellite groups of solar-system objects:
//!
//! | Root / branch                  | Source query                     | Children  |
//! |--------------------------------|----------------------------------|-----------|
//! | Solar system                   | `lookup_by_name(home star)`      | leaf      |
//! | One star kind                  | `Stars(kind)` with context       | ordered   |
//! | Stars                          | one branch per kind              | unordered |
//! | Deep sky objects               | `DeepSky`, classified by prefix  | unordered |
//! | Satellites of an object        | `SolarSystem { primary }`        | ordered   |
//!
//! ## Absence vs. defects
//!
//! Missing data is reported with `None`: an unknown home star, a query returning no
//! entries, a group that ended up empty. Branches without entries are left out of their
//! parent instead of being created empty.
//!
//! A classifier bucket without a configured label is a defect of the static tables and is
//! returned as [`BrowserError::MissingGroupLabel`](crate::browser_errors::BrowserError::MissingGroupLabel).
//! Two buckets resolving to the same label would merge two groups under one name, so this is
//! returned as [`BrowserError::DuplicateGroupLabel`](crate::browser_errors::BrowserError::DuplicateGroupLabel).
//!
//! ## Naming
//!
//! Leaf names always come from [`CatalogQueryPort::canonical_name`](crate::catalog::CatalogQueryPort::canonical_name).
//! The builder never sorts ranked lists: star branches keep the catalog order.
use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::browser_errors::BrowserError;
use crate::catalog::{
    observation_context::ObservationContext, star_browser_kind::StarBrowserKind, CatalogEntry,
    CatalogKind, CatalogQueryPort, ObjectHandle,
};
use crate::classifier::{body_rules, deep_sky_rules, RuleTable};
use crate::config::BrowserConfig;
use crate::constants::ObjectName;
use crate::node::BrowserNode;

/// Builds browser trees from a catalog.
pub struct BrowserTreeBuilder<'a, C: CatalogQueryPort> {
    catalog: &'a C,
    config: &'a BrowserConfig,
    deep_sky_rules: &'a RuleTable,
    body_rules: &'a RuleTable,
}

/// The validated rule tables used by a [`BrowserTreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRules {
    pub deep_sky: RuleTable,
    pub bodies: RuleTable,
}

impl GroupRules {
    /// The built-in deep-sky and body tables.
    pub fn builtin() -> Result<Self, BrowserError> {
        Ok(GroupRules {
            deep_sky: deep_sky_rules()?,
            bodies: body_rules()?,
        })
    }
}

impl<'a, C: CatalogQueryPort> BrowserTreeBuilder<'a, C> {
    pub fn new(catalog: &'a C, config: &'a BrowserConfig, rules: &'a GroupRules) -> Self {
        BrowserTreeBuilder {
            catalog,
            config,
            deep_sky_rules: &rules.deep_sky,
            body_rules: &rules.bodies,
        }
    }

    fn leaf(&self, handle: ObjectHandle) -> (ObjectName, Arc<BrowserNode>) {
        let name = self.catalog.canonical_name(handle);
        let node = Arc::new(BrowserNode::leaf(name.clone(), handle));
        (name, node)
    }

    /// Build the solar-system root: a leaf wrapping the configured home star.
    ///
    /// Return
    /// ----------
    /// * `None` when the catalog has no object named [`BrowserConfig::home_star`].
    pub fn build_solar_root(&self) -> Option<BrowserNode> {
        let Some(home) = self.catalog.lookup_by_name(&self.config.home_star) else {
            warn!(
                home_star = %self.config.home_star,
                "home star not found, solar system root unavailable"
            );
            return None;
        };
        let name = self.catalog.canonical_name(home);
        debug!(%name, "built solar system root");
        Some(
            BrowserNode::leaf(name, home)
                .with_secondary_name(self.config.titles.solar_system_tab.clone()),
        )
    }

    /// Build the branch listing the stars of one kind, titled `title`.
    ///
    /// Arguments
    /// -----------------
    /// * `kind`: The star ranking requested from the catalog.
    /// * `context`: Viewpoint of the ranking. It is only passed to the catalog when
    ///   [`CatalogKind::needs_context`] holds for the query.
    /// * `title`: Name of the returned node.
    /// * `ordered`: Keep the catalog ranking (`true`) or key the stars by name (`false`).
    ///
    /// Return
    /// ----------
    /// * The branch, or `None` when the query returned no star.
    pub fn build_star_kind_root(
        &self,
        kind: StarBrowserKind,
        context: Option<&ObservationContext>,
        title: &str,
        ordered: bool,
    ) -> Option<BrowserNode> {
        let query = CatalogKind::Stars(kind);
        let context = context.filter(|_| query.needs_context());
        let entries = self.catalog.query_catalog(query, context);
        if entries.is_empty() {
            debug!(%kind, "star query returned no entries, branch omitted");
            return None;
        }
        let stars = entries.iter().map(|entry| self.leaf(entry.handle));
        let node = if ordered {
            BrowserNode::ordered(title, stars)
        } else {
            BrowserNode::unordered(title, stars)
        };
        debug!(%kind, children = node.len(), ordered, "built star branch");
        Some(node)
    }

    /// Build the ordered branch for `kind`, titled from the configuration.
    pub fn build_star_kind(
        &self,
        kind: StarBrowserKind,
        context: Option<&ObservationContext>,
    ) -> Option<BrowserNode> {
        self.build_star_kind_root(kind, context, self.config.titles.star_kind(kind), true)
    }

    /// Build the composite "Stars" root.
    ///
    /// The nearest, brighter and with-planets branches are built for `context`; the
    /// already built absolute magnitude branch (`brightest`) is merged in by name. When two
    /// branches share a name, the one inserted later wins.
    ///
    /// Return
    /// ----------
    /// * The root, or `None` when every branch is empty.
    pub fn build_star_root(
        &self,
        context: &ObservationContext,
        brightest: Option<Arc<BrowserNode>>,
    ) -> Option<BrowserNode> {
        let mut branches: HashMap<ObjectName, Arc<BrowserNode>> = HashMap::new();
        for kind in [
            StarBrowserKind::Nearest,
            StarBrowserKind::Brighter,
            StarBrowserKind::WithPlanets,
        ] {
            if let Some(branch) = self.build_star_kind(kind, Some(context)) {
                branches.insert(branch.name().to_string(), Arc::new(branch));
            }
        }
        if let Some(brightest) = brightest {
            branches.insert(brightest.name().to_string(), brightest);
        }

        if branches.is_empty() {
            return None;
        }
        debug!(%context, branches = branches.len(), "built star root");
        Some(BrowserNode::unordered(self.config.titles.stars.clone(), branches))
    }

    /// Build the deep-sky root: every deep-sky object, bucketed by type.
    ///
    /// Each entry is classified with the deep-sky rule table and stored in its bucket
    /// under its canonical name (the last object wins on a name collision). Every
    /// non-empty bucket becomes a child named after its configured label.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when the deep-sky catalog is empty.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if a bucket key has no label.
    /// * [`BrowserError::DuplicateGroupLabel`] if two non-empty buckets share a label.
    pub fn build_dso_root(&self) -> Result<Option<BrowserNode>, BrowserError> {
        let entries = self.catalog.query_catalog(CatalogKind::DeepSky, None);

        let mut buckets: HashMap<&str, HashMap<ObjectName, Arc<BrowserNode>>> = HashMap::new();
        for entry in &entries {
            let key = self.deep_sky_rules.classify(&entry.type_tag);
            let (name, node) = self.leaf(entry.handle);
            buckets.entry(key).or_default().insert(name, node);
        }

        if buckets.is_empty() {
            return Ok(None);
        }

        let mut groups: HashMap<ObjectName, Arc<BrowserNode>> = HashMap::new();
        for (key, members) in buckets
            .into_iter()
            .sorted_by_key(|(key, _)| self.deep_sky_rules.rank(key))
        {
            let label = self.config.deep_sky_label(key)?;
            if groups.contains_key(label) {
                return Err(BrowserError::DuplicateGroupLabel(label.to_string()));
            }
            groups.insert(
                label.to_string(),
                Arc::new(BrowserNode::unordered(label, members)),
            );
        }

        debug!(
            objects = entries.len(),
            groups = groups.len(),
            "built deep sky root"
        );
        Ok(Some(
            BrowserNode::unordered(self.config.titles.deep_sky.clone(), groups)
                .with_secondary_name(self.config.titles.deep_sky_tab.clone()),
        ))
    }

    /// Build the satellite groups of a solar-system object (planets of a star, moons of a
    /// planet, ...).
    ///
    /// Bodies are classified with the body rule table. Groups follow the rule order and
    /// keep the catalog order of their bodies. The returned node is named after the
    /// object.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when nothing orbits `primary`.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if a bucket key has no label.
    /// * [`BrowserError::DuplicateGroupLabel`] if two non-empty groups share a label.
    pub fn build_satellite_root(
        &self,
        primary: ObjectHandle,
    ) -> Result<Option<BrowserNode>, BrowserError> {
        let entries = self
            .catalog
            .query_catalog(CatalogKind::SolarSystem { primary }, None);
        if entries.is_empty() {
            return Ok(None);
        }

        let mut buckets: Vec<(&str, Vec<&CatalogEntry>)> = Vec::new();
        for entry in &entries {
            let key = self.body_rules.classify(&entry.type_tag);
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(entry),
                None => buckets.push((key, vec![entry])),
            }
        }
        buckets.sort_by_key(|(key, _)| self.body_rules.rank(key));

        let mut groups: Vec<(ObjectName, Arc<BrowserNode>)> = Vec::with_capacity(buckets.len());
        for (key, members) in buckets {
            let label = self.config.body_label(key)?;
            if groups.iter().any(|(existing, _)| existing == label) {
                return Err(BrowserError::DuplicateGroupLabel(label.to_string()));
            }
            let bodies = members.into_iter().map(|entry| self.leaf(entry.handle));
            groups.push((
                label.to_string(),
                Arc::new(BrowserNode::ordered(label, bodies)),
            ));
        }

        let name = self.catalog.canonical_name(primary);
        debug!(%name, groups = groups.len(), "built satellite groups");
        Ok(Some(BrowserNode::ordered(name, groups)))
    }
}
