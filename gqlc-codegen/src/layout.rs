//! File layout strategies.
//!
//! A layout groups emitted declarations into planned units. Rendering the
//! plans is the language target's job.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    builder::Declaration,
    emitter::EmittedType,
    error::{GenerationError, Result},
    language::LanguageTarget,
};

/// Name of the unit holding shared infrastructure in multi-unit output.
pub const SHARED_UNIT_NAME: &str = "BaseClasses";

/// Name of the root operations entry point.
pub const OPERATIONS_NAME: &str = "GraphQlOperations";

/// A unit waiting to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPlan<'a> {
    pub name: String,
    pub declarations: Vec<&'a Declaration>,
    /// Other units this one depends on, in first-use order.
    pub references: Vec<String>,
    /// The unit carries the shared infrastructure.
    pub shared: bool,
}

impl UnitPlan<'_> {
    /// Whether any declaration is an enum.
    pub fn has_enums(&self) -> bool {
        self.declarations
            .iter()
            .any(|d| matches!(d, Declaration::Enum(_)))
    }

    /// Whether any declaration needs the shared infrastructure.
    pub fn uses_infrastructure(&self) -> bool {
        self.shared || self.declarations.iter().any(|d| d.uses_infrastructure())
    }
}

/// Strategy grouping declarations into units.
pub trait LayoutStrategy {
    fn plan<'a>(
        &self,
        emitted: &'a [EmittedType],
        operations: &'a Declaration,
        target: &dyn LanguageTarget,
    ) -> Result<Vec<UnitPlan<'a>>>;
}

/// Everything in one unit.
#[derive(Debug, Clone)]
pub struct SingleUnitLayout {
    pub unit_name: String,
}

impl LayoutStrategy for SingleUnitLayout {
    fn plan<'a>(
        &self,
        emitted: &'a [EmittedType],
        operations: &'a Declaration,
        target: &dyn LanguageTarget,
    ) -> Result<Vec<UnitPlan<'a>>> {
        check_unique_declarations(emitted, operations, target)?;

        let mut declarations = vec![operations];
        declarations.extend(emitted.iter().flat_map(|e| e.declarations.iter()));
        if target.requires_ordered_declarations() {
            declarations = order_by_references(declarations)?;
        }

        Ok(vec![UnitPlan {
            name: self.unit_name.clone(),
            declarations,
            references: Vec::new(),
            shared: true,
        }])
    }
}

/// One unit per schema type plus a shared unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiUnitLayout;

impl LayoutStrategy for MultiUnitLayout {
    fn plan<'a>(
        &self,
        emitted: &'a [EmittedType],
        operations: &'a Declaration,
        target: &dyn LanguageTarget,
    ) -> Result<Vec<UnitPlan<'a>>> {
        check_unique_declarations(emitted, operations, target)?;

        // Declaration name -> owning unit.
        let mut owners: HashMap<&str, &str> = HashMap::new();
        owners.insert(operations.name(), SHARED_UNIT_NAME);
        // Unit name -> what claimed it first.
        let mut units: HashMap<&str, &str> = HashMap::new();
        units.insert(SHARED_UNIT_NAME, "shared infrastructure");
        for e in emitted {
            if let Some(first) = units.insert(&e.target_name, &e.target_name) {
                return Err(GenerationError::DuplicateDeclaration {
                    name: e.target_name.clone(),
                    first: first.to_string(),
                    second: e.target_name.clone(),
                });
            }
            for declaration in &e.declarations {
                owners.insert(declaration.name(), &e.target_name);
            }
        }

        let mut plans = Vec::with_capacity(emitted.len() + 1);
        for e in emitted {
            let declarations: Vec<&Declaration> = e.declarations.iter().collect();
            plans.push(UnitPlan {
                name: e.target_name.clone(),
                references: unit_references(&e.target_name, &declarations, &owners),
                declarations,
                shared: false,
            });
        }

        plans.push(UnitPlan {
            name: SHARED_UNIT_NAME.to_string(),
            references: unit_references(SHARED_UNIT_NAME, &[operations], &owners),
            declarations: vec![operations],
            shared: true,
        });

        Ok(plans)
    }
}

fn unit_references(
    unit: &str,
    declarations: &[&Declaration],
    owners: &HashMap<&str, &str>,
) -> Vec<String> {
    let mut references: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        if name != unit && !references.iter().any(|r| r == name) {
            references.push(name.to_string());
        }
    };
    for declaration in declarations {
        for name in declaration.references() {
            if let Some(owner) = owners.get(name.as_str()) {
                push(owner);
            }
        }
        if declaration.uses_infrastructure() {
            push(SHARED_UNIT_NAME);
        }
    }
    references
}

/// Every declaration name must be unique across the whole output.
fn check_unique_declarations(
    emitted: &[EmittedType],
    operations: &Declaration,
    target: &dyn LanguageTarget,
) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for &name in target.reserved_type_names() {
        seen.insert(name, "the target language");
    }

    let all = std::iter::once(("root operations", operations)).chain(
        emitted
            .iter()
            .flat_map(|e| e.declarations.iter().map(move |d| (e.target_name.as_str(), d))),
    );
    for (owner, declaration) in all {
        if let Some(first) = seen.insert(declaration.name(), owner) {
            return Err(GenerationError::DuplicateDeclaration {
                name: declaration.name().to_string(),
                first: first.to_string(),
                second: owner.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Order declarations so each one follows everything it references.
///
/// Declarations keep their relative order where no reference forces a move.
fn order_by_references(declarations: Vec<&Declaration>) -> Result<Vec<&Declaration>> {
    let index: IndexMap<&str, &Declaration> =
        declarations.iter().map(|&d| (d.name(), d)).collect();
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut ordered = Vec::with_capacity(declarations.len());

    for &name in index.keys() {
        visit(name, &index, &mut marks, &mut stack, &mut ordered)?;
    }
    Ok(ordered)
}

fn visit<'a>(
    name: &'a str,
    index: &IndexMap<&'a str, &'a Declaration>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    ordered: &mut Vec<&'a Declaration>,
) -> Result<()> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(name.to_string());
            return Err(GenerationError::CyclicDeclarations { cycle });
        }
        None => {}
    }

    let Some(&declaration) = index.get(name) else {
        return Ok(());
    };
    marks.insert(name, Mark::Visiting);
    stack.push(name);
    for reference in declaration.references() {
        if let Some((&key, _)) = index.get_key_value(reference.as_str()) {
            visit(key, index, marks, stack, ordered)?;
        }
    }
    stack.pop();
    marks.insert(name, Mark::Done);
    ordered.push(declaration);
    Ok(())
}
