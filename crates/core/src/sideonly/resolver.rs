use std::collections::{HashMap, HashSet};

use crate::facet::MinecraftFacet;
use crate::model::{Annotation, ClassId, FieldId, FileId, MethodId, ModuleModel};
use crate::types::{Position, Side};

use super::annotation::{find_side_annotation, resolve_annotation_side};

/// Whether a module qualifies for side analysis at all. Callers must gate on
/// this before constructing a [`SideResolver`]; modules outside the supported
/// platforms are never checked.
pub fn beginning_check(module: &ModuleModel) -> bool {
    module
        .facet
        .as_ref()
        .is_some_and(MinecraftFacet::eligible_for_side_checks)
}

/// Resolves the [`Side`] of classes, methods and fields in one module
/// snapshot.
///
/// Resolution is a pure function of the element's own annotation, the
/// module's ambient side and the element's class hierarchy. Per-class results
/// are memoized against the borrowed snapshot; the cache dies with the
/// resolver. Every operation totalizes: missing owners, unresolved supertypes
/// and malformed annotations degrade to `None`/`Invalid`, they never fail.
pub struct SideResolver<'m> {
    module: &'m ModuleModel,
    cache: HashMap<ClassId, Side>,
    /// Classes on the current resolution stack; anything in here is skipped
    /// when it reappears below itself in the supertype graph
    in_progress: HashSet<ClassId>,
}

impl<'m> SideResolver<'m> {
    pub fn new(module: &'m ModuleModel) -> Self {
        Self {
            module,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn ambient_side(&self) -> Side {
        self.module
            .facet
            .as_ref()
            .map_or(Side::None, MinecraftFacet::ambient_side)
    }

    /// Side declared directly on an annotation list: the normalized value,
    /// `Invalid` when the required `value` attribute is missing, or nothing
    /// when no restriction annotation is present
    fn annotated_side(annotations: &[Annotation]) -> Option<Side> {
        let annotation = find_side_annotation(annotations)?;
        Some(match annotation.value() {
            Some(value) => resolve_annotation_side(value),
            None => Side::Invalid,
        })
    }

    pub fn check_field(&mut self, field: FieldId) -> Side {
        Self::annotated_side(&self.module.field(field).annotations)
            .unwrap_or_else(|| self.ambient_side())
    }

    pub fn check_method(&mut self, method: MethodId) -> Side {
        Self::annotated_side(&self.module.method(method).annotations)
            .unwrap_or_else(|| self.ambient_side())
    }

    /// Walk from an arbitrary source position up to its enclosing method.
    /// Positions inside a class body but outside any method have no method
    /// side to speak of and resolve to `Invalid`.
    pub fn check_element_in_method(&mut self, file: FileId, position: Position) -> Side {
        let Some(class) = self.module.find_class_at(file, position) else {
            return Side::Invalid;
        };
        match self.module.find_method_at(class, position) {
            Some(method) => self.check_method(method),
            None => Side::Invalid,
        }
    }

    /// The class and every lexically enclosing class, closest first, each
    /// with its own resolved side. Nested classes inherit restrictions from
    /// their outer classes independently of subtype inheritance.
    pub fn check_class_hierarchy(&mut self, class: ClassId) -> Vec<(Side, ClassId)> {
        let mut chain = vec![class];
        let mut current = class;
        while let Some(enclosing) = self.module.class(current).enclosing {
            chain.push(enclosing);
            current = enclosing;
        }
        chain
            .into_iter()
            .map(|c| (self.check_class(c), c))
            .collect()
    }

    /// First restricted (or invalid) side in the lexical hierarchy
    pub fn side_for_class(&mut self, class: ClassId) -> Side {
        let hierarchy = self.check_class_hierarchy(class);
        Self::first_side(&hierarchy)
    }

    /// First entry that is not `None`, else `None`
    pub fn first_side(hierarchy: &[(Side, ClassId)]) -> Side {
        hierarchy
            .iter()
            .map(|&(side, _)| side)
            .find(|&side| side != Side::None)
            .unwrap_or(Side::None)
    }

    fn check_class(&mut self, class: ClassId) -> Side {
        if let Some(&side) = self.cache.get(&class) {
            return side;
        }
        if !self.in_progress.insert(class) {
            // Re-entered through a cyclic hierarchy; contributes nothing and
            // must not be cached
            return Side::None;
        }
        let side = self.resolve_class(class);
        self.in_progress.remove(&class);
        self.cache.insert(class, side);
        side
    }

    fn resolve_class(&mut self, class: ClassId) -> Side {
        let module = self.module;
        let data = module.class(class);

        if let Some(side) = Self::annotated_side(&data.annotations) {
            return side;
        }

        if data.super_types.is_empty() {
            return self.ambient_side();
        }

        // Adopt the side of the first supertype that resolves inside this
        // module, skipping self-references and anything already being
        // resolved further up the stack
        let supers: Vec<ClassId> = data
            .super_types
            .iter()
            .filter_map(|name| module.resolve_class(name, data.file))
            .collect();
        for super_id in supers {
            if super_id == class || self.in_progress.contains(&super_id) {
                continue;
            }
            let hierarchy = self.check_class_hierarchy(super_id);
            if let Some(&(side, _)) = hierarchy.first() {
                return side;
            }
        }

        self.ambient_side()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::{FabricModJson, MinecraftFacet};
    use crate::model::testutil::{with_value, ModelBuilder};
    use crate::types::Span;

    const ENVIRONMENT: &str = "net.fabricmc.api.Environment";
    const ONLY_IN: &str = "net.minecraftforge.api.distmarker.OnlyIn";
    const SIDE_ONLY: &str = "net.minecraftforge.fml.relauncher.SideOnly";

    fn fabric_facet(environment: Option<&str>) -> MinecraftFacet {
        MinecraftFacet::fabric(
            Some(FabricModJson {
                id: Some("test".to_string()),
                environment: environment.map(String::from),
                ..FabricModJson::default()
            }),
            None,
        )
    }

    #[test]
    fn test_ambient_side_for_plain_class() {
        let mut b = ModelBuilder::new();
        b.set_facet(fabric_facet(Some("server")));
        let file = b.file("src/com/demo/Plain.java", Some("com.demo"));
        let class = b.class(file, "Plain", &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.side_for_class(class), Side::Server);
    }

    #[test]
    fn test_self_referential_class_terminates() {
        let mut b = ModelBuilder::new();
        b.set_facet(fabric_facet(Some("client")));
        let file = b.file("src/com/demo/Loop.java", Some("com.demo"));
        let class = b.class_extending(file, "Loop", &["Loop"], &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.side_for_class(class), Side::Client);
    }

    #[test]
    fn test_mutually_recursive_hierarchy_terminates() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Cycle.java", Some("com.demo"));
        let a = b.class_extending(file, "A", &["B"], &[]);
        b.class_extending(file, "B", &["A"], &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.side_for_class(a), Side::None);
    }

    #[test]
    fn test_inherited_side_from_supertype() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Widgets.java", Some("com.demo"));
        b.class(
            file,
            "Base",
            &[with_value("SideOnly", SIDE_ONLY, "Side.SERVER")],
        );
        let sub = b.class_extending(file, "Sub", &["Base"], &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.side_for_class(sub), Side::Server);
    }

    #[test]
    fn test_annotated_class_hierarchy() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Foo.java", Some("com.demo"));
        let foo = b.class(file, "Foo", &[with_value("OnlyIn", ONLY_IN, "Dist.CLIENT")]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        let hierarchy = resolver.check_class_hierarchy(foo);
        assert_eq!(hierarchy, vec![(Side::Client, foo)]);
        assert_eq!(resolver.side_for_class(foo), Side::Client);
    }

    #[test]
    fn test_nested_class_inherits_outer_side() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Outer.java", Some("com.demo"));
        let outer = b.class(
            file,
            "Outer",
            &[with_value("Environment", ENVIRONMENT, "EnvType.SERVER")],
        );
        let inner = b.nested_class(outer, "Inner", &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        let hierarchy = resolver.check_class_hierarchy(inner);
        assert_eq!(hierarchy, vec![(Side::None, inner), (Side::Server, outer)]);
        assert_eq!(resolver.side_for_class(inner), Side::Server);
    }

    #[test]
    fn test_missing_value_attribute_is_invalid() {
        let mut b = ModelBuilder::new();
        b.set_facet(fabric_facet(Some("client")));
        let file = b.file("src/com/demo/Broken.java", Some("com.demo"));
        let class = b.class(file, "Broken", &[]);

        let mut bare = with_value("Environment", ENVIRONMENT, "EnvType.CLIENT");
        bare.values.clear();
        let field = b.field(class, "handle", std::slice::from_ref(&bare));
        let method = b.method(class, "render", std::slice::from_ref(&bare));
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.check_field(field), Side::Invalid);
        assert_eq!(resolver.check_method(method), Side::Invalid);
    }

    #[test]
    fn test_unannotated_members_use_ambient_side() {
        let mut b = ModelBuilder::new();
        b.set_facet(fabric_facet(Some("client")));
        let file = b.file("src/com/demo/Ambient.java", Some("com.demo"));
        let class = b.class(file, "Ambient", &[]);
        let field = b.field(class, "handle", &[]);
        let method = b.method(class, "tick", &[]);
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.check_field(field), Side::Client);
        assert_eq!(resolver.check_method(method), Side::Client);
    }

    #[test]
    fn test_unrecognized_value_is_invalid() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Odd.java", Some("com.demo"));
        let class = b.class(file, "Odd", &[]);
        let field = b.field(
            class,
            "handle",
            &[with_value("Environment", ENVIRONMENT, "EnvType.BOTH")],
        );
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.check_field(field), Side::Invalid);
    }

    #[test]
    fn test_element_in_method() {
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Host.java", Some("com.demo"));
        let class = b.class_spanning(
            file,
            "Host",
            &[],
            Span::new(Position::new(0, 0), Position::new(20, 1)),
        );
        b.method_spanning(
            class,
            "render",
            &[with_value("OnlyIn", ONLY_IN, "Dist.CLIENT")],
            Span::new(Position::new(3, 4), Position::new(6, 5)),
        );
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        // Inside the method body
        assert_eq!(
            resolver.check_element_in_method(file, Position::new(4, 8)),
            Side::Client
        );
        // Inside the class but outside any method
        assert_eq!(
            resolver.check_element_in_method(file, Position::new(10, 0)),
            Side::Invalid
        );
        // Outside any class
        assert_eq!(
            resolver.check_element_in_method(file, Position::new(40, 0)),
            Side::Invalid
        );
    }

    #[test]
    fn test_beginning_check_gates_unsupported_modules() {
        let mut b = ModelBuilder::new();
        b.file("src/com/demo/A.java", Some("com.demo"));
        let model = b.finish();
        assert!(!beginning_check(&model));

        let mut b = ModelBuilder::new();
        b.set_facet(fabric_facet(None));
        let model = b.finish();
        assert!(beginning_check(&model));

        let mut b = ModelBuilder::new();
        b.set_facet(MinecraftFacet::forge(None));
        let model = b.finish();
        assert!(!beginning_check(&model));
    }

    #[test]
    fn test_invalid_side_wins_over_outer_side() {
        // getFirstSide takes the first non-none entry, including Invalid
        let mut b = ModelBuilder::new();
        let file = b.file("src/com/demo/Outer.java", Some("com.demo"));
        let outer = b.class(
            file,
            "Outer",
            &[with_value("Environment", ENVIRONMENT, "EnvType.SERVER")],
        );
        let inner = b.nested_class(
            outer,
            "Inner",
            &[with_value("Environment", ENVIRONMENT, "EnvType.NOPE")],
        );
        let model = b.finish();

        let mut resolver = SideResolver::new(&model);
        assert_eq!(resolver.side_for_class(inner), Side::Invalid);
    }
}
