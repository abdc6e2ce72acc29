//! The shapes of a SHACL shapes graph, parsed into plain Rust values.

use crate::consts::sh;
use crate::graph::VocabGraph;
use crate::util::RdfSyntax;
use anyhow::{anyhow, Result};
use log::debug;
use oxigraph::model::vocab::rdf;
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef};
use std::collections::HashMap;
use std::fmt;

/// Index of a shape in its [`ShapesGraph`].
pub type ShapeId = usize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Violation,
    Warning,
    Info,
}

impl Severity {
    /// 1 for violations, 2 for warnings, 3 for info.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Violation => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }

    pub fn from_iri(iri: NamedNodeRef) -> Option<Self> {
        if iri == sh::VIOLATION {
            Some(Severity::Violation)
        } else if iri == sh::WARNING {
            Some(Severity::Warning)
        } else if iri == sh::INFO {
            Some(Severity::Info)
        } else {
            None
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Severity::Violation => "sh:Violation",
            Severity::Warning => "sh:Warning",
            Severity::Info => "sh:Info",
        })
    }
}

/// A predicate, or a choice between predicates (`sh:alternativePath`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath {
    Predicate(NamedNode),
    Alternative(Vec<NamedNode>),
}

impl PropertyPath {
    pub fn predicates(&self) -> &[NamedNode] {
        match self {
            PropertyPath::Predicate(p) => std::slice::from_ref(p),
            PropertyPath::Alternative(paths) => paths,
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyPath::Predicate(p) => write!(f, "{p}"),
            PropertyPath::Alternative(paths) => {
                let joined: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", joined.join(" | "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Instances of the class or any of its subclasses.
    Class(NamedNode),
    ObjectsOf(NamedNode),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Iri,
    BlankNode,
    Literal,
    BlankNodeOrIri,
    BlankNodeOrLiteral,
    IriOrLiteral,
}

impl NodeKind {
    fn from_iri(iri: NamedNodeRef) -> Option<Self> {
        [
            (sh::IRI, NodeKind::Iri),
            (sh::BLANK_NODE, NodeKind::BlankNode),
            (sh::LITERAL, NodeKind::Literal),
            (sh::BLANK_NODE_OR_IRI, NodeKind::BlankNodeOrIri),
            (sh::BLANK_NODE_OR_LITERAL, NodeKind::BlankNodeOrLiteral),
            (sh::IRI_OR_LITERAL, NodeKind::IriOrLiteral),
        ]
        .into_iter()
        .find(|(candidate, _)| *candidate == iri)
        .map(|(_, kind)| kind)
    }

    pub fn matches(self, term: &Term) -> bool {
        let (iri, blank, literal) = match term {
            Term::NamedNode(_) => (true, false, false),
            Term::BlankNode(_) => (false, true, false),
            Term::Literal(_) => (false, false, true),
            #[allow(unreachable_patterns)]
            _ => (false, false, false),
        };
        match self {
            NodeKind::Iri => iri,
            NodeKind::BlankNode => blank,
            NodeKind::Literal => literal,
            NodeKind::BlankNodeOrIri => blank || iri,
            NodeKind::BlankNodeOrLiteral => blank || literal,
            NodeKind::IriOrLiteral => iri || literal,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Iri => "sh:IRI",
            NodeKind::BlankNode => "sh:BlankNode",
            NodeKind::Literal => "sh:Literal",
            NodeKind::BlankNodeOrIri => "sh:BlankNodeOrIRI",
            NodeKind::BlankNodeOrLiteral => "sh:BlankNodeOrLiteral",
            NodeKind::IriOrLiteral => "sh:IRIOrLiteral",
        })
    }
}

#[derive(Debug, Clone)]
pub enum Constraint {
    Class(NamedNode),
    Datatype(NamedNode),
    NodeKind(NodeKind),
    MinCount(usize),
    MaxCount(usize),
    UniqueLang,
    Property(ShapeId),
    Or(Vec<ShapeId>),
    Not(ShapeId),
}

impl Constraint {
    /// Local name of the constraint component in the SHACL namespace.
    pub fn component(&self) -> &'static str {
        match self {
            Constraint::Class(_) => "ClassConstraintComponent",
            Constraint::Datatype(_) => "DatatypeConstraintComponent",
            Constraint::NodeKind(_) => "NodeKindConstraintComponent",
            Constraint::MinCount(_) => "MinCountConstraintComponent",
            Constraint::MaxCount(_) => "MaxCountConstraintComponent",
            Constraint::UniqueLang => "UniqueLangConstraintComponent",
            Constraint::Property(_) => "PropertyConstraintComponent",
            Constraint::Or(_) => "OrConstraintComponent",
            Constraint::Not(_) => "NotConstraintComponent",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    /// The shape's node in the shapes graph.
    pub node: Term,
    /// Set for property shapes.
    pub path: Option<PropertyPath>,
    pub targets: Vec<Target>,
    pub constraints: Vec<Constraint>,
    pub severity: Severity,
    pub message: Option<String>,
}

impl Shape {
    fn new(node: Term) -> Self {
        Self {
            node,
            path: None,
            targets: vec![],
            constraints: vec![],
            severity: Severity::Violation,
            message: None,
        }
    }

    pub fn is_property_shape(&self) -> bool {
        self.path.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShapesGraph {
    shapes: Vec<Shape>,
}

impl ShapesGraph {
    /// Reads every shape of `graph`: declared node and property shapes, anything
    /// with a target, and every shape those reference. SHACL terms outside the
    /// supported subset are an error rather than being skipped.
    pub fn parse(graph: &Graph) -> Result<Self> {
        let mut roots: Vec<Term> = vec![];
        for class in [sh::NODE_SHAPE, sh::PROPERTY_SHAPE] {
            roots.extend(
                graph
                    .subjects_for_predicate_object(rdf::TYPE, class)
                    .map(|s| Term::from(s.into_owned())),
            );
        }
        for predicate in [sh::TARGET_CLASS, sh::TARGET_OBJECTS_OF] {
            roots.extend(
                graph
                    .triples_for_predicate(predicate)
                    .map(|t| Term::from(t.subject.into_owned())),
            );
        }
        roots.sort_by_cached_key(|t| t.to_string());
        roots.dedup();
        let mut parser = ShapeParser {
            graph,
            shapes: vec![],
            index: HashMap::new(),
        };
        for root in &roots {
            parser.shape(root)?;
        }
        debug!("Parsed {} shapes", parser.shapes.len());
        Ok(Self {
            shapes: parser.shapes,
        })
    }

    pub fn from_turtle(text: &str) -> Result<Self> {
        let graph = VocabGraph::parse_bytes(text.as_bytes(), RdfSyntax::Turtle)?;
        Self::parse(graph.graph())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id]
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// The term as a triple subject, `None` for literals.
pub(crate) fn as_subject(term: &Term) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        Term::NamedNode(n) => Some(n.as_ref().into()),
        Term::BlankNode(b) => Some(b.as_ref().into()),
        _ => None,
    }
}

struct ShapeParser<'a> {
    graph: &'a Graph,
    shapes: Vec<Shape>,
    index: HashMap<Term, ShapeId>,
}

impl ShapeParser<'_> {
    fn object(&self, subject: NamedOrBlankNodeRef, predicate: NamedNodeRef) -> Option<Term> {
        self.graph
            .object_for_subject_predicate(subject, predicate)
            .map(TermRef::into_owned)
    }

    /// Parses the shape at `node` once; later references get the same id, which
    /// also makes recursive shape references terminate.
    fn shape(&mut self, node: &Term) -> Result<ShapeId> {
        if let Some(id) = self.index.get(node) {
            return Ok(*id);
        }
        let id = self.shapes.len();
        self.shapes.push(Shape::new(node.clone()));
        self.index.insert(node.clone(), id);

        let subject =
            as_subject(node).ok_or_else(|| anyhow!("A literal cannot be a shape: {node}"))?;
        let mut shape = Shape::new(node.clone());
        let triples: Vec<(NamedNode, Term)> = self
            .graph
            .triples_for_subject(subject)
            .map(|t| (t.predicate.into_owned(), t.object.into_owned()))
            .collect();
        for (predicate, object) in triples {
            let p = predicate.as_ref();
            if p == sh::PATH {
                shape.path = Some(self.path(&object)?);
            } else if p == sh::TARGET_CLASS {
                shape.targets.push(Target::Class(named(&object)?));
            } else if p == sh::TARGET_OBJECTS_OF {
                shape.targets.push(Target::ObjectsOf(named(&object)?));
            } else if p == sh::CLASS {
                shape.constraints.push(Constraint::Class(named(&object)?));
            } else if p == sh::DATATYPE {
                shape.constraints.push(Constraint::Datatype(named(&object)?));
            } else if p == sh::NODE_KIND {
                let kind = NodeKind::from_iri(named(&object)?.as_ref())
                    .ok_or_else(|| anyhow!("Unknown node kind {object}"))?;
                shape.constraints.push(Constraint::NodeKind(kind));
            } else if p == sh::MIN_COUNT {
                shape.constraints.push(Constraint::MinCount(integer(&object)?));
            } else if p == sh::MAX_COUNT {
                shape.constraints.push(Constraint::MaxCount(integer(&object)?));
            } else if p == sh::UNIQUE_LANG {
                if boolean(&object) {
                    shape.constraints.push(Constraint::UniqueLang);
                }
            } else if p == sh::PROPERTY {
                shape.constraints.push(Constraint::Property(self.shape(&object)?));
            } else if p == sh::NOT {
                shape.constraints.push(Constraint::Not(self.shape(&object)?));
            } else if p == sh::OR {
                let members = self.list(&object)?;
                let ids = members
                    .iter()
                    .map(|m| self.shape(m))
                    .collect::<Result<_>>()?;
                shape.constraints.push(Constraint::Or(ids));
            } else if p == sh::SEVERITY {
                shape.severity = Severity::from_iri(named(&object)?.as_ref())
                    .ok_or_else(|| anyhow!("Unknown severity {object}"))?;
            } else if p == sh::MESSAGE {
                shape.message = Some(lexical(&object));
            } else if p.as_str().starts_with(sh::NAMESPACE) {
                return Err(anyhow!(
                    "Shape {node} uses {p}, which this validator does not support"
                ));
            }
        }
        self.shapes[id] = shape;
        Ok(id)
    }

    fn list(&self, head: &Term) -> Result<Vec<Term>> {
        let mut items = vec![];
        let mut current = head.clone();
        while !matches!(&current, Term::NamedNode(n) if n.as_ref() == rdf::NIL) {
            let node =
                as_subject(&current).ok_or_else(|| anyhow!("Malformed RDF list at {current}"))?;
            match (self.object(node, rdf::FIRST), self.object(node, rdf::REST)) {
                (Some(first), Some(rest)) => {
                    items.push(first);
                    current = rest;
                }
                _ => return Err(anyhow!("Malformed RDF list at {current}")),
            }
            if items.len() > 10_000 {
                return Err(anyhow!("RDF list starting at {head} does not end"));
            }
        }
        Ok(items)
    }

    fn path(&self, node: &Term) -> Result<PropertyPath> {
        let subject = match node {
            Term::NamedNode(n) => return Ok(PropertyPath::Predicate(n.clone())),
            Term::BlankNode(b) => NamedOrBlankNodeRef::from(b.as_ref()),
            _ => return Err(anyhow!("{node} is not a property path")),
        };
        match self.object(subject, sh::ALTERNATIVE_PATH) {
            Some(list) => Ok(PropertyPath::Alternative(
                self.list(&list)?
                    .iter()
                    .map(named)
                    .collect::<Result<_>>()?,
            )),
            None => Err(anyhow!("Unsupported property path {node}")),
        }
    }
}

fn named(term: &Term) -> Result<NamedNode> {
    match term {
        Term::NamedNode(n) => Ok(n.clone()),
        other => Err(anyhow!("Expected an IRI in the shapes graph, found {other}")),
    }
}

fn lexical(term: &Term) -> String {
    match term {
        Term::Literal(l) => l.value().to_string(),
        Term::NamedNode(n) => n.as_str().to_string(),
        other => other.to_string(),
    }
}

fn integer(term: &Term) -> Result<usize> {
    lexical(term)
        .parse()
        .map_err(|_| anyhow!("Expected a non-negative integer in the shapes graph, found {term}"))
}

fn boolean(term: &Term) -> bool {
    matches!(lexical(term).as_str(), "true" | "1")
}
