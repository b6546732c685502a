//! Pattern generation from annotated instances.
//!
//! The required nodes (argument heads plus connective words) are joined by
//! a Steiner tree. The longest path through that tree becomes one nested
//! query expression; the remaining tree edges are attached as conjuncts
//! anchored on already-named nodes. Dependency and constituency trees share
//! this procedure and differ only in how nodes and edges are written
//! (see [`PatternDialect`]).

use std::collections::BTreeMap;

use causeway_core::config::TaggerConfig;
use causeway_core::types::collections::{FxHashMap, FxHashSet};
use causeway_core::PatternType;
use tracing::debug;

use super::dialect::{ConstituencyDialect, DependencyDialect, NodeRole, PatternDialect};
use super::types::GeneratedPattern;
use crate::graph::{longest_path_in_tree, steiner_tree, SteinerTree};
use crate::sentence::ParsedSentence;

/// Turns annotated instances into tree queries. Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct PatternGenerator {
    pattern_type: PatternType,
    max_steiners: usize,
}

impl PatternGenerator {
    pub fn new(config: &TaggerConfig) -> Self {
        Self::with_settings(config.effective_pattern_type(), config.effective_max_steiners())
    }

    pub fn with_settings(pattern_type: PatternType, max_steiners: usize) -> Self {
        Self {
            pattern_type,
            max_steiners,
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// Generate the query for one instance. `None` when the instance cannot
    /// yield a usable pattern (too many Steiner nodes, identical argument
    /// heads, missing parse).
    pub fn generate(
        &self,
        sentence: &ParsedSentence,
        connective: &[usize],
        cause: &[usize],
        effect: &[usize],
    ) -> Option<GeneratedPattern> {
        match self.pattern_type {
            PatternType::Dependency => self.dependency_pattern(sentence, connective, cause, effect),
            PatternType::Constituency => self.constituency_pattern(sentence, connective, cause, effect),
        }
    }

    fn dependency_pattern(
        &self,
        sentence: &ParsedSentence,
        connective: &[usize],
        cause: &[usize],
        effect: &[usize],
    ) -> Option<GeneratedPattern> {
        let cause_head = sentence.get_head(cause)?;
        let effect_head = sentence.get_head(effect)?;
        if cause_head == effect_head {
            debug!(sentence = %sentence.original_text(), "Cause and effect share a head; skipping instance");
            return None;
        }

        let graph = sentence.edge_graph();
        let mut required: Vec<usize> = [cause_head, effect_head]
            .into_iter()
            .chain(connective.iter().copied())
            .collect();
        required.sort_unstable();
        required.dedup();
        // Preprocessing may have detached some tokens from the tree.
        required.retain(|&node| {
            let attached = graph.has_incident_edges(node);
            if !attached {
                debug!(token = node, sentence = %sentence.original_text(), "Eliminating detached token from pattern");
            }
            attached
        });

        let tree = steiner_tree(graph, &required, sentence.path_table());
        if !self.within_budget(&tree, sentence) {
            return None;
        }
        let seed = seed_node(&tree, connective, &required)?;
        let dialect = DependencyDialect { sentence };
        Some(render(&dialect, &tree, connective, cause_head, effect_head, seed))
    }

    fn constituency_pattern(
        &self,
        sentence: &ParsedSentence,
        connective: &[usize],
        cause: &[usize],
        effect: &[usize],
    ) -> Option<GeneratedPattern> {
        let constituency = sentence.constituency()?;
        let cause_node = constituency.node_for_tokens(cause)?;
        let effect_node = constituency.node_for_tokens(effect)?;
        if cause_node == effect_node {
            debug!(sentence = %sentence.original_text(), "Cause and effect share a constituent; skipping instance");
            return None;
        }
        let connective_nodes = connective
            .iter()
            .map(|&token| constituency.preterminal_of(token))
            .collect::<Option<Vec<usize>>>()?;

        let mut terminals = vec![cause_node, effect_node];
        terminals.extend(&connective_nodes);
        let tree = steiner_tree(constituency.graph(), &terminals, constituency.paths());
        if !self.within_budget(&tree, sentence) {
            return None;
        }
        let seed = seed_node(&tree, &connective_nodes, &tree.terminals)?;
        let dialect = ConstituencyDialect { tree: constituency };
        Some(render(&dialect, &tree, &connective_nodes, cause_node, effect_node, seed))
    }

    fn within_budget(&self, tree: &SteinerTree, sentence: &ParsedSentence) -> bool {
        if tree.steiner_nodes.len() > self.max_steiners {
            debug!(
                steiner_nodes = tree.steiner_nodes.len(),
                max = self.max_steiners,
                sentence = %sentence.original_text(),
                "Ignoring very long pattern"
            );
            return false;
        }
        true
    }
}

/// First connective node in the tree, else the first required node.
fn seed_node(tree: &SteinerTree, connective: &[usize], required: &[usize]) -> Option<usize> {
    connective
        .iter()
        .copied()
        .find(|&node| tree.contains(node))
        .or_else(|| required.first().copied())
}

/// Assigns capture names. Steiner nodes are numbered in order of first
/// appearance so the same tree shape always yields the same names.
struct NodeNamer<'a> {
    tree: &'a SteinerTree,
    connective: &'a [usize],
    effect: usize,
    names: FxHashMap<usize, String>,
    connective_names: BTreeMap<usize, String>,
    steiner_count: usize,
}

impl NodeNamer<'_> {
    fn role(&self, node: usize) -> NodeRole {
        if let Some(position) = self.connective.iter().position(|&c| c == node) {
            NodeRole::Connective(position)
        } else if self.tree.is_steiner_node(node) {
            NodeRole::Steiner
        } else if node == self.effect {
            NodeRole::Effect
        } else {
            NodeRole::Cause
        }
    }

    /// Name `node` and return its node pattern.
    fn node_pattern<D: PatternDialect>(&mut self, dialect: &D, node: usize) -> String {
        let role = self.role(node);
        let name = match role {
            NodeRole::Connective(position) => {
                let name = format!("connective_{position}");
                self.connective_names.insert(position, name.clone());
                name
            }
            NodeRole::Steiner => {
                let name = format!("steiner_{}", self.steiner_count);
                self.steiner_count += 1;
                name
            }
            NodeRole::Cause => "cause".to_string(),
            NodeRole::Effect => "effect".to_string(),
        };
        let pattern = dialect.node_pattern(node, role, &name);
        self.names.insert(node, name);
        pattern
    }

    /// Back-reference to an already-named node, else a fresh node pattern.
    fn named_node_pattern<D: PatternDialect>(&mut self, dialect: &D, node: usize) -> String {
        match self.names.get(&node) {
            Some(name) => format!("={name}"),
            None => format!("({})", self.node_pattern(dialect, node)),
        }
    }
}

fn render<D: PatternDialect>(
    dialect: &D,
    tree: &SteinerTree,
    connective: &[usize],
    cause: usize,
    effect: usize,
    seed: usize,
) -> GeneratedPattern {
    let mut path = longest_path_in_tree(&tree.graph, seed);
    if D::NORMALIZES_DIRECTION {
        let cause_at = path.iter().position(|&n| n == cause);
        let effect_at = path.iter().position(|&n| n == effect);
        if let (Some(c), Some(e)) = (cause_at, effect_at) {
            if c > e {
                path.reverse();
            }
        }
    }

    let mut namer = NodeNamer {
        tree,
        connective,
        effect,
        names: FxHashMap::default(),
        connective_names: BTreeMap::new(),
        steiner_count: 0,
    };
    let mut fragments = Vec::new();

    let mut pattern = format!("({}", namer.node_pattern(dialect, path[0]));
    for pair in path.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let end_pattern = namer.node_pattern(dialect, end);
        let (extended, fragment) = dialect.add_edge(&tree.graph, &pattern, &end_pattern, start, end, &namer.names);
        pattern = extended;
        fragments.extend(fragment);
    }
    pattern.push_str(&")".repeat(path.len()));

    let on_path: FxHashSet<(usize, usize)> = path.windows(2).map(|pair| (pair[0], pair[1])).collect();
    for (start, end, _) in tree.graph.edges() {
        if on_path.contains(&(start, end)) || on_path.contains(&(end, start)) {
            continue;
        }
        let start_pattern = namer.named_node_pattern(dialect, start);
        let end_pattern = namer.named_node_pattern(dialect, end);
        let (edge_pattern, fragment) =
            dialect.add_edge(&tree.graph, &start_pattern, &end_pattern, start, end, &namer.names);
        fragments.extend(fragment);
        pattern = format!("{pattern} : ({edge_pattern}))");
    }

    for fragment in fragments {
        debug!(fragment = %fragment, "Adding pattern fragment");
        pattern = format!("{pattern} : ({fragment})");
    }

    if D::LINKS_ARGUMENTS_TO_CONNECTIVES {
        for (arg, arg_name) in [(cause, "cause"), (effect, "effect")] {
            if connective.contains(&arg) {
                if let Some(name) = namer.names.get(&arg) {
                    pattern = format!("{pattern} : (__={arg_name} == ={name})");
                }
            }
        }
    }

    // Cause and effect on the same node is always a spurious match.
    pattern.push_str(" : (=effect !== =cause)");

    GeneratedPattern {
        query: pattern,
        connective_labels: namer.connective_names.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::SentenceBuilder;

    fn smoking() -> (ParsedSentence, [usize; 3]) {
        let mut b = SentenceBuilder::new();
        let smoking = b.add_token("Smoking", "smoking", "NN");
        let causes = b.add_token("causes", "cause", "VBZ");
        let cancer = b.add_token("cancer", "cancer", "NN");
        b.add_edge(0, causes, "root")
            .add_edge(causes, smoking, "nsubj")
            .add_edge(causes, cancer, "dobj")
            .constituency("(ROOT (S (NP (NN Smoking)) (VP (VBZ causes) (NP (NN cancer)))))");
        (b.build().unwrap(), [smoking, causes, cancer])
    }

    #[test]
    fn dependency_pattern_for_simple_verb() {
        let (sentence, [smoking, causes, cancer]) = smoking();
        let generator = PatternGenerator::with_settings(PatternType::Dependency, 6);
        let generated = generator.generate(&sentence, &[causes], &[smoking], &[cancer]).unwrap();
        assert_eq!(
            generated.query,
            "(/.*_[0-9]+/=cause [<1 nsubj | <1 csubj | <1 dep] > \
             (/^cause_[0-9]+$/=connective_0 <2 /^VB.*/ < (/.*_[0-9]+/=effect [<1 dobj | <1 dep]))) \
             : (=effect !== =cause)"
        );
        assert_eq!(generated.connective_labels, vec!["connective_0".to_string()]);
    }

    #[test]
    fn argument_that_is_connective_gets_linked() {
        let (sentence, [smoking, causes, _]) = smoking();
        let generator = PatternGenerator::with_settings(PatternType::Dependency, 6);
        let generated = generator.generate(&sentence, &[causes], &[smoking], &[causes]).unwrap();
        assert!(generated.query.contains(" : (__=effect == =connective_0)"));
        assert!(generated.query.ends_with(" : (=effect !== =cause)"));
    }

    #[test]
    fn identical_heads_are_abandoned() {
        let (sentence, [smoking, causes, _]) = smoking();
        let generator = PatternGenerator::with_settings(PatternType::Dependency, 6);
        assert!(generator.generate(&sentence, &[causes], &[smoking], &[smoking]).is_none());
    }

    #[test]
    fn constituency_pattern_uses_tree_labels() {
        let (sentence, [smoking, causes, cancer]) = smoking();
        let generator = PatternGenerator::with_settings(PatternType::Constituency, 6);
        let generated = generator.generate(&sentence, &[causes], &[smoking], &[cancer]).unwrap();
        assert!(generated.query.contains("(/^VB.*/=connective_0 < causes)"));
        assert!(generated.query.contains("NN=cause"));
        assert!(generated.query.contains("NN=effect"));
        assert!(generated.query.contains("__=steiner_0"));
        assert!(generated.query.ends_with(" : (=effect !== =cause)"));
    }

    #[test]
    fn steiner_budget_is_enforced() {
        let (sentence, [smoking, causes, cancer]) = smoking();
        // The constituency tree needs four intermediate nodes here.
        let tight = PatternGenerator::with_settings(PatternType::Constituency, 3);
        assert!(tight.generate(&sentence, &[causes], &[smoking], &[cancer]).is_none());
    }
}
