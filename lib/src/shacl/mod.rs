//! A SHACL validator for the constraint components the bundled vocabulary
//! profiles use: `class`, `datatype`, `nodeKind`, `minCount`, `maxCount`,
//! `uniqueLang`, `property`, `or` and `not`, over `targetClass` and
//! `targetObjectsOf` targets and predicate or alternative paths. Shapes using
//! anything else fail to parse.

pub mod report;
pub mod shapes;

pub use report::{ValidationReport, ValidationResult};
pub use shapes::{Constraint, PropertyPath, Severity, Shape, ShapeId, ShapesGraph, Target};

use crate::consts::rdfs;
use log::debug;
use oxigraph::model::vocab::rdf;
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, Term, TermRef};
use shapes::as_subject;
use std::collections::{HashMap, HashSet};

/// Nesting limit for shapes referencing shapes.
const MAX_DEPTH: usize = 32;

type Failure = (Option<Term>, String);

/// Validates `data` against every targeted shape in `shapes`.
pub fn validate(data: &Graph, shapes: &ShapesGraph) -> ValidationReport {
    let validator = Validator { data, shapes };
    let mut results = vec![];
    for (id, shape) in shapes.shapes().iter().enumerate() {
        if shape.targets.is_empty() {
            continue;
        }
        let focus_nodes = validator.focus_nodes(shape);
        debug!("Shape {} has {} focus nodes", shape.node, focus_nodes.len());
        for focus in &focus_nodes {
            validator.validate_shape(id, focus, &mut results, 0);
        }
    }
    ValidationReport::new(results)
}

fn dedup(nodes: Vec<Term>) -> Vec<Term> {
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

fn each(
    values: &[Term],
    test: impl Fn(&Term) -> bool,
    describe: impl Fn(&Term) -> String,
) -> Vec<Failure> {
    values
        .iter()
        .filter(|v| !test(v))
        .map(|v| (Some(v.clone()), describe(v)))
        .collect()
}

struct Validator<'a> {
    data: &'a Graph,
    shapes: &'a ShapesGraph,
}

impl Validator<'_> {
    fn focus_nodes(&self, shape: &Shape) -> Vec<Term> {
        let mut nodes = vec![];
        for target in &shape.targets {
            match target {
                Target::Class(class) => {
                    for class in self.subclasses(class.as_ref()) {
                        nodes.extend(
                            self.data
                                .subjects_for_predicate_object(rdf::TYPE, class.as_ref())
                                .map(|s| Term::from(s.into_owned())),
                        );
                    }
                }
                Target::ObjectsOf(predicate) => nodes.extend(
                    self.data
                        .triples_for_predicate(predicate)
                        .map(|t| t.object.into_owned()),
                ),
            }
        }
        dedup(nodes)
    }

    /// `class` and every class below it through `rdfs:subClassOf` in the data graph.
    fn subclasses(&self, class: NamedNodeRef) -> Vec<NamedNode> {
        let mut found = vec![class.into_owned()];
        let mut next = 0;
        while next < found.len() {
            let current = found[next].clone();
            for sub in self
                .data
                .subjects_for_predicate_object(rdfs::SUB_CLASS_OF, current.as_ref())
            {
                if let NamedOrBlankNodeRef::NamedNode(sub) = sub {
                    let sub = sub.into_owned();
                    if !found.contains(&sub) {
                        found.push(sub);
                    }
                }
            }
            next += 1;
        }
        found
    }

    fn is_instance_of(&self, value: &Term, class: &NamedNode) -> bool {
        let Some(subject) = as_subject(value) else {
            return false;
        };
        let classes = self.subclasses(class.as_ref());
        self.data
            .objects_for_subject_predicate(subject, rdf::TYPE)
            .any(|t| matches!(t, TermRef::NamedNode(n) if classes.iter().any(|c| c.as_ref() == n)))
    }

    fn value_nodes(&self, shape: &Shape, focus: &Term) -> Vec<Term> {
        let Some(path) = &shape.path else {
            return vec![focus.clone()];
        };
        let Some(subject) = as_subject(focus) else {
            return vec![];
        };
        dedup(
            path.predicates()
                .iter()
                .flat_map(|p| {
                    self.data
                        .objects_for_subject_predicate(subject, p)
                        .map(TermRef::into_owned)
                })
                .collect(),
        )
    }

    fn validate_shape(
        &self,
        id: ShapeId,
        focus: &Term,
        results: &mut Vec<ValidationResult>,
        depth: usize,
    ) {
        let shape = self.shapes.shape(id);
        if depth > MAX_DEPTH {
            debug!("Shape nesting deeper than {MAX_DEPTH} at {}, stopping", shape.node);
            return;
        }
        let values = self.value_nodes(shape, focus);
        for constraint in &shape.constraints {
            if let Constraint::Property(property) = constraint {
                for value in &values {
                    self.validate_shape(*property, value, results, depth + 1);
                }
                continue;
            }
            for (value, message) in self.failures(shape, constraint, focus, &values, depth) {
                results.push(ValidationResult {
                    focus_node: focus.clone(),
                    path: shape.path.clone(),
                    value,
                    source_shape: shape.node.clone(),
                    component: constraint.component(),
                    severity: shape.severity,
                    message: shape.message.clone().unwrap_or(message),
                });
            }
        }
    }

    fn conforms(&self, id: ShapeId, focus: &Term, depth: usize) -> bool {
        let mut results = vec![];
        self.validate_shape(id, focus, &mut results, depth + 1);
        results.is_empty()
    }

    fn failures(
        &self,
        shape: &Shape,
        constraint: &Constraint,
        focus: &Term,
        values: &[Term],
        depth: usize,
    ) -> Vec<Failure> {
        let path = shape
            .path
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default();
        match constraint {
            Constraint::Class(class) => each(
                values,
                |v| self.is_instance_of(v, class),
                |v| format!("Value {v} does not have class {class}"),
            ),
            Constraint::Datatype(datatype) => each(
                values,
                |v| matches!(v, Term::Literal(l) if l.datatype() == datatype.as_ref()),
                |v| format!("Value {v} is not a literal with datatype {datatype}"),
            ),
            Constraint::NodeKind(kind) => each(
                values,
                |v| kind.matches(v),
                |v| format!("Value {v} is not of node kind {kind}"),
            ),
            Constraint::MinCount(min) if values.len() < *min => {
                vec![(None, format!("Less than {min} values on {focus}->{path}"))]
            }
            Constraint::MaxCount(max) if values.len() > *max => {
                vec![(None, format!("More than {max} values on {focus}->{path}"))]
            }
            Constraint::MinCount(_) | Constraint::MaxCount(_) => vec![],
            Constraint::UniqueLang => {
                let mut counts: HashMap<String, usize> = HashMap::new();
                for value in values {
                    if let Term::Literal(l) = value {
                        if let Some(language) = l.language() {
                            *counts.entry(language.to_lowercase()).or_default() += 1;
                        }
                    }
                }
                let mut repeated: Vec<String> = counts
                    .into_iter()
                    .filter(|(_, n)| *n > 1)
                    .map(|(language, _)| language)
                    .collect();
                repeated.sort();
                repeated
                    .into_iter()
                    .map(|language| {
                        (
                            None,
                            format!("More than one value shares the language tag '{language}' on {focus}->{path}"),
                        )
                    })
                    .collect()
            }
            // evaluated by validate_shape, which reports the nested results
            Constraint::Property(_) => vec![],
            Constraint::Or(ids) => each(
                values,
                |v| ids.iter().any(|id| self.conforms(*id, v, depth)),
                |v| {
                    let names: Vec<String> = ids
                        .iter()
                        .map(|id| self.shapes.shape(*id).node.to_string())
                        .collect();
                    format!("Node {v} does not conform to any of the shapes {}", names.join(", "))
                },
            ),
            Constraint::Not(id) => each(
                values,
                |v| !self.conforms(*id, v, depth),
                |v| format!("Node {v} conforms to shape {}", self.shapes.shape(*id).node),
            ),
        }
    }
}
