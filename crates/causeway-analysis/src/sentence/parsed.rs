//! Parsed sentences: tokens, dependency graph, optional constituency tree.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write as _;

use causeway_core::constants::ROOT_LABEL;
use causeway_core::errors::SentenceError;
use causeway_core::types::collections::FxHashSet;
use causeway_core::PatternType;

use super::bracketed::{parse_bracketed, Bracketed};
use super::constituency::ConstituencyTree;
use super::instance::CausationInstance;
use super::token::{tree_escape, Token};
use crate::graph::{PathTable, WeightedDigraph};
use crate::results::PossibleCausation;

/// Weight of every dependency arc.
const DEPENDENCY_EDGE_WEIGHT: f64 = 1.0;

/// One arc along a dependency path, always in head-to-dependent direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStep {
    pub source: usize,
    pub target: usize,
    pub label: String,
}

/// A sentence with its parses and annotations.
///
/// Read-only to the tagger except for `possible_causations`, which the
/// connective stage fills in.
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    tokens: Vec<Token>,
    edge_labels: BTreeMap<(usize, usize), String>,
    edge_graph: WeightedDigraph,
    paths: PathTable,
    /// Distance from ROOT following arcs forward; `None` if unreachable.
    depths: Vec<Option<usize>>,
    constituency: Option<ConstituencyTree>,
    causation_instances: Vec<CausationInstance>,
    pub possible_causations: Vec<PossibleCausation>,
}

impl ParsedSentence {
    fn assemble(
        tokens: Vec<Token>,
        edge_labels: BTreeMap<(usize, usize), String>,
        constituency: Option<ConstituencyTree>,
        causation_instances: Vec<CausationInstance>,
    ) -> Self {
        let mut edge_graph = WeightedDigraph::with_nodes(tokens.len());
        for &(head, dependent) in edge_labels.keys() {
            edge_graph.add_edge(head, dependent, DEPENDENCY_EDGE_WEIGHT);
        }
        let paths = PathTable::compute(&edge_graph, false);

        let mut depths = vec![None; tokens.len()];
        if !depths.is_empty() {
            depths[0] = Some(0);
            let mut queue = VecDeque::from([0usize]);
            while let Some(node) = queue.pop_front() {
                let next_depth = depths[node].map(|d| d + 1);
                for child in edge_graph.out_neighbors(node) {
                    if depths[child].is_none() {
                        depths[child] = next_depth;
                        queue.push_back(child);
                    }
                }
            }
        }

        Self {
            tokens,
            edge_labels,
            edge_graph,
            paths,
            depths,
            constituency,
            causation_instances,
            possible_causations: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Token count, ROOT included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    /// Surface text without ROOT.
    pub fn original_text(&self) -> String {
        self.tokens
            .iter()
            .skip(1)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn edge_label(&self, head: usize, dependent: usize) -> Option<&str> {
        self.edge_labels.get(&(head, dependent)).map(String::as_str)
    }

    pub fn edge_graph(&self) -> &WeightedDigraph {
        &self.edge_graph
    }

    /// Undirected all-pairs shortest paths over the dependency graph.
    pub fn path_table(&self) -> &PathTable {
        &self.paths
    }

    pub fn constituency(&self) -> Option<&ConstituencyTree> {
        self.constituency.as_ref()
    }

    pub fn causation_instances(&self) -> &[CausationInstance] {
        &self.causation_instances
    }

    /// Head of a token span: the token closest to ROOT. Ties go to verbs,
    /// then to the earlier token.
    pub fn get_head(&self, tokens: &[usize]) -> Option<usize> {
        tokens
            .iter()
            .copied()
            .filter(|&t| t < self.tokens.len())
            .min_by_key(|&t| (self.depths[t].unwrap_or(usize::MAX), !self.tokens[t].is_verb(), t))
    }

    /// Arcs along the shortest undirected path between two tokens.
    pub fn extract_dependency_path(&self, from: usize, to: usize) -> Vec<DependencyStep> {
        let Some(nodes) = self.paths.path(from, to) else {
            return Vec::new();
        };
        nodes
            .windows(2)
            .filter_map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                if let Some(label) = self.edge_label(a, b) {
                    Some(DependencyStep { source: a, target: b, label: label.to_string() })
                } else {
                    self.edge_label(b, a)
                        .map(|label| DependencyStep { source: b, target: a, label: label.to_string() })
                }
            })
            .collect()
    }

    /// Bracketed dependency tree on one line: `(lemma_INDEX deplabel POS child...)`.
    ///
    /// A token with several heads is expanded under the first one visited
    /// and appears without children elsewhere. Tokens unreachable from ROOT
    /// are omitted.
    pub fn to_dependency_tree_string(&self) -> String {
        let mut out = String::new();
        let mut expanded = FxHashSet::default();
        self.write_dependency_node(0, ROOT_LABEL, &mut expanded, &mut out);
        out
    }

    fn write_dependency_node(&self, index: usize, label: &str, expanded: &mut FxHashSet<usize>, out: &mut String) {
        let token = &self.tokens[index];
        let _ = write!(out, "({}_{} {} {}", tree_lemma(token), index, tree_escape(label), tree_escape(&token.pos));
        if expanded.insert(index) {
            for child in self.edge_graph.out_neighbors(index) {
                let child_label = self.edge_label(index, child).unwrap_or_default();
                out.push(' ');
                self.write_dependency_node(child, child_label, expanded, out);
            }
        }
        out.push(')');
    }

    /// Serialized tree in the form the matcher reads for `pattern_type`.
    pub fn to_tree_string(&self, pattern_type: PatternType) -> Result<String, SentenceError> {
        match pattern_type {
            PatternType::Dependency => Ok(self.to_dependency_tree_string()),
            PatternType::Constituency => self
                .constituency
                .as_ref()
                .map(ToString::to_string)
                .ok_or(SentenceError::MissingConstituencyTree),
        }
    }

    /// A copy whose dependency arcs are read from a (possibly rewritten)
    /// bracketed dependency tree. Tokens missing from the tree keep no arcs.
    pub fn substitute_dependency_tree(&self, tree: &str) -> Result<Self, SentenceError> {
        let parsed = parse_bracketed(tree)?;
        let mut edge_labels = BTreeMap::new();
        self.collect_tree_edges(&parsed, None, &mut edge_labels)?;
        Ok(Self::assemble(
            self.tokens.clone(),
            edge_labels,
            self.constituency.clone(),
            self.causation_instances.clone(),
        ))
    }

    fn collect_tree_edges(
        &self,
        node: &Bracketed,
        parent: Option<usize>,
        edges: &mut BTreeMap<(usize, usize), String>,
    ) -> Result<(), SentenceError> {
        let Bracketed::Node { label, children } = node else {
            return Ok(());
        };
        let index = token_index_of(label)?;
        if index >= self.tokens.len() {
            return Err(SentenceError::TokenOutOfRange { index, len: self.tokens.len() });
        }
        if let Some(head) = parent {
            let dep_label = children.first().map(Bracketed::label).unwrap_or_default();
            edges.insert((head, index), dep_label.to_string());
        }
        for child in children.iter().filter(|c| !c.is_leaf()) {
            self.collect_tree_edges(child, Some(index), edges)?;
        }
        Ok(())
    }
}

/// Lemma as written into dependency tree labels.
pub(crate) fn tree_lemma(token: &Token) -> String {
    tree_escape(&token.lemma)
}

fn token_index_of(label: &str) -> Result<usize, SentenceError> {
    label
        .rsplit_once('_')
        .and_then(|(_, suffix)| suffix.parse().ok())
        .ok_or_else(|| SentenceError::MissingTokenIndex { label: label.to_string() })
}

/// Incremental constructor for [`ParsedSentence`]. Starts with ROOT.
#[derive(Debug, Clone)]
pub struct SentenceBuilder {
    tokens: Vec<Token>,
    edges: Vec<(usize, usize, String)>,
    constituency: Option<String>,
    instances: Vec<CausationInstance>,
}

impl Default for SentenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self {
            tokens: vec![Token::root()],
            edges: Vec::new(),
            constituency: None,
            instances: Vec::new(),
        }
    }

    /// Append a token and return its index.
    pub fn add_token(&mut self, text: &str, lemma: &str, pos: &str) -> usize {
        let index = self.tokens.len();
        self.tokens.push(Token::new(index, text, lemma, pos));
        index
    }

    pub fn add_edge(&mut self, head: usize, dependent: usize, label: &str) -> &mut Self {
        self.edges.push((head, dependent, label.to_string()));
        self
    }

    pub fn constituency(&mut self, tree: &str) -> &mut Self {
        self.constituency = Some(tree.to_string());
        self
    }

    pub fn add_instance(&mut self, instance: CausationInstance) -> &mut Self {
        self.instances.push(instance);
        self
    }

    pub fn build(self) -> Result<ParsedSentence, SentenceError> {
        let len = self.tokens.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(SentenceError::TokenOutOfRange { index, len })
            }
        };

        let mut edge_labels = BTreeMap::new();
        for (head, dependent, label) in self.edges {
            check(head)?;
            check(dependent)?;
            edge_labels.insert((head, dependent), label);
        }
        for instance in &self.instances {
            let args = instance.cause.iter().chain(instance.effect.iter()).flatten();
            for &index in instance.connective.iter().chain(args) {
                check(index)?;
            }
        }

        let constituency = match self.constituency {
            Some(text) => {
                let tree = ConstituencyTree::parse(&text)?;
                if tree.leaf_count() + 1 != len {
                    return Err(SentenceError::MalformedTree {
                        offset: 0,
                        message: format!(
                            "constituency tree has {} leaves for {} tokens",
                            tree.leaf_count(),
                            len - 1
                        ),
                    });
                }
                Some(tree)
            }
            None => None,
        };

        Ok(ParsedSentence::assemble(self.tokens, edge_labels, constituency, self.instances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "Smoking causes cancer" with gold annotation.
    fn smoking() -> ParsedSentence {
        let mut b = SentenceBuilder::new();
        let smoking = b.add_token("Smoking", "smoking", "NN");
        let causes = b.add_token("causes", "cause", "VBZ");
        let cancer = b.add_token("cancer", "cancer", "NN");
        b.add_edge(0, causes, "root")
            .add_edge(causes, smoking, "nsubj")
            .add_edge(causes, cancer, "dobj")
            .constituency("(ROOT (S (NP (NN Smoking)) (VP (VBZ causes) (NP (NN cancer)))))")
            .add_instance(CausationInstance::new(vec![causes], Some(vec![smoking]), Some(vec![cancer])));
        b.build().unwrap()
    }

    #[test]
    fn dependency_tree_string() {
        let s = smoking();
        assert_eq!(
            s.to_dependency_tree_string(),
            "(ROOT_0 ROOT ROOT (cause_2 root VBZ (smoking_1 nsubj NN) (cancer_3 dobj NN)))"
        );
    }

    #[test]
    fn head_is_closest_to_root() {
        let s = smoking();
        assert_eq!(s.get_head(&[1, 2, 3]), Some(2));
        assert_eq!(s.get_head(&[1, 3]), Some(1));
        assert_eq!(s.get_head(&[]), None);
    }

    #[test]
    fn dependency_path_keeps_arc_direction() {
        let s = smoking();
        let path = s.extract_dependency_path(1, 3);
        assert_eq!(path.len(), 2);
        assert_eq!((path[0].source, path[0].target, path[0].label.as_str()), (2, 1, "nsubj"));
        assert_eq!((path[1].source, path[1].target, path[1].label.as_str()), (2, 3, "dobj"));
    }

    #[test]
    fn substitution_rebuilds_edges() {
        let s = smoking();
        let rewritten = s
            .substitute_dependency_tree("(ROOT_0 ROOT ROOT (cause_2 root VBZ (cancer_3 nsubjpass NN)))")
            .unwrap();
        assert_eq!(rewritten.edge_label(2, 3), Some("nsubjpass"));
        assert!(!rewritten.edge_graph().has_incident_edges(1));
        assert_eq!(rewritten.causation_instances().len(), 1);
    }

    #[test]
    fn substitution_rejects_unknown_tokens() {
        let s = smoking();
        assert!(matches!(
            s.substitute_dependency_tree("(ROOT_0 ROOT ROOT (x_9 dep NN))"),
            Err(SentenceError::TokenOutOfRange { index: 9, .. })
        ));
        assert!(matches!(
            s.substitute_dependency_tree("(ROOT_0 ROOT ROOT (cause root VBZ))"),
            Err(SentenceError::MissingTokenIndex { .. })
        ));
    }

    #[test]
    fn builder_validates_constituency_leaves() {
        let mut b = SentenceBuilder::new();
        b.add_token("a", "a", "DT");
        b.constituency("(ROOT (NP (DT a) (NN b)))");
        assert!(b.build().is_err());
    }

    #[test]
    fn tree_string_per_mode() {
        let s = smoking();
        assert!(s.to_tree_string(PatternType::Constituency).unwrap().starts_with("(ROOT (S"));
        let bare = SentenceBuilder::new().build().unwrap();
        assert!(bare.to_tree_string(PatternType::Constituency).is_err());
    }
}
