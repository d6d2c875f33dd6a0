//! Integration tests for full link generation.

use ormgraph_core::model::jdbc;
use ormgraph_core::{
    Attribute, Cardinality, ChangeLog, DefaultRules, Entity, EntityChange, Error, ForeignKey,
    Link, LinkUpdater, Model, RelationBuilder,
};
use pretty_assertions::assert_eq;

fn pk(column: &str, position: u32) -> Attribute {
    Attribute::new(column, "INTEGER", jdbc::INTEGER, position).with_primary_key()
}

fn column(column: &str, position: u32) -> Attribute {
    Attribute::new(column, "INTEGER", jdbc::INTEGER, position)
}

fn fk(name: &str, table: &str, referenced: &str, column: &str) -> ForeignKey {
    ForeignKey::new(name, table, referenced).with_column(column, "ID")
}

/// Customers, orders, products, order lines and a student/course join table.
fn school_shop_model() -> Model {
    Model::new()
        .with_entity(Entity::new("CUSTOMERS", "Customers").with_attribute(pk("ID", 1)))
        .with_entity(Entity::new("PRODUCTS", "Products").with_attribute(pk("ID", 1)))
        .with_entity(
            Entity::new("ORDERS", "Orders")
                .with_attribute(pk("ID", 1))
                .with_attribute(column("CUSTOMER_ID", 2))
                .with_foreign_key(fk("FK_ORDER_CUSTOMER", "ORDERS", "CUSTOMERS", "CUSTOMER_ID")),
        )
        .with_entity(
            Entity::new("ORDER_LINE", "OrderLine")
                .with_attribute(pk("ID", 1))
                .with_attribute(column("ORDER_ID", 2))
                .with_attribute(column("PRODUCT_ID", 3))
                .with_foreign_key(fk("FK_LINE_ORDER", "ORDER_LINE", "ORDERS", "ORDER_ID"))
                .with_foreign_key(fk("FK_LINE_PRODUCT", "ORDER_LINE", "PRODUCTS", "PRODUCT_ID")),
        )
        .with_entity(Entity::new("STUDENTS", "Students").with_attribute(pk("ID", 1)))
        .with_entity(Entity::new("COURSES", "Courses").with_attribute(pk("ID", 1)))
        .with_entity(
            Entity::new("STUDENT_COURSE", "StudentCourse")
                .with_attribute(pk("STUDENT_ID", 1))
                .with_attribute(pk("COURSE_ID", 2))
                .with_foreign_key(fk("FK_SC_STUDENT", "STUDENT_COURSE", "STUDENTS", "STUDENT_ID"))
                .with_foreign_key(fk("FK_SC_COURSE", "STUDENT_COURSE", "COURSES", "COURSE_ID")),
        )
}

fn snapshot(model: &Model) -> Vec<Link> {
    model.all_links().into_iter().cloned().collect()
}

#[test]
fn test_rebuild_all_links_is_idempotent() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let rules = DefaultRules::new();
    let builder = RelationBuilder::new(&rules);
    let mut model = school_shop_model();

    let first_count = builder.rebuild_all_links(&mut model).unwrap();
    let first = snapshot(&model);
    let second_count = builder.rebuild_all_links(&mut model).unwrap();
    let second = snapshot(&model);

    // 3 many-to-one relations and 1 many-to-many relation
    assert_eq!(first_count, 8);
    assert_eq!(second_count, first_count);
    assert_eq!(first, second);
}

#[test]
fn test_every_link_has_exactly_one_mirror() {
    let rules = DefaultRules::new();
    let mut model = school_shop_model();
    RelationBuilder::new(&rules).rebuild_all_links(&mut model).unwrap();

    for link in model.all_links() {
        let mirror = model.link(&link.mirror_id).expect("mirror link exists");
        assert_eq!(mirror.mirror_id, link.id);
        assert_ne!(mirror.owning_side, link.owning_side);
        assert_eq!(mirror.source_table_name, link.target_table_name);
        assert_eq!(mirror.target_table_name, link.source_table_name);

        let (owning, inverse) = if link.owning_side { (link, mirror) } else { (mirror, link) };
        assert_eq!(inverse.mapped_by.as_deref(), Some(owning.field_name.as_str()));
        assert!(owning.mapped_by.is_none());
    }
}

#[test]
fn test_join_table_produces_one_many_to_many_pair() {
    let rules = DefaultRules::new();
    let mut model = school_shop_model();
    RelationBuilder::new(&rules).rebuild_all_links(&mut model).unwrap();

    let many_to_many: Vec<&Link> = model
        .all_links()
        .into_iter()
        .filter(|l| l.cardinality == Cardinality::ManyToMany)
        .collect();
    assert_eq!(many_to_many.len(), 2);

    let with_descriptor: Vec<&&Link> = many_to_many
        .iter()
        .filter(|l| l.join_table.is_some())
        .collect();
    assert_eq!(with_descriptor.len(), 1);
    assert!(with_descriptor[0].owning_side);

    // FK_SC_COURSE sorts first: courses own the relation.
    assert_eq!(with_descriptor[0].source_table_name, "COURSES");
    assert_eq!(with_descriptor[0].field_name, "listOfStudents");
    assert!(model.entity("STUDENT_COURSE").unwrap().links().is_empty());
    assert!(model.entity("STUDENT_COURSE").unwrap().is_join_table());
}

#[test]
fn test_three_foreign_keys_cannot_form_a_many_to_many() {
    let rules = DefaultRules::new();
    let builder = RelationBuilder::new(&rules);
    let mut model = school_shop_model();
    {
        let entity = model.entity_mut("STUDENT_COURSE").unwrap();
        entity.store_attribute(pk("TERM_ID", 3));
        entity.store_foreign_key(fk("FK_SC_TERM", "STUDENT_COURSE", "TERMS", "TERM_ID"));
    }
    model.store_entity(Entity::new("TERMS", "Terms").with_attribute(pk("ID", 1)));

    let err = builder
        .build_many_to_many_relation(&mut model, "STUDENT_COURSE")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidJoinTableShape { foreign_key_count: 3, .. }
    ));
    assert!(err.is_invariant_violation());

    // Not classified as a join table: three plain many-to-one relations.
    assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 12);
    assert_eq!(model.entity("STUDENT_COURSE").unwrap().links_count(), 3);
}

#[test]
fn test_dangling_foreign_key_aborts_the_pass() {
    let rules = DefaultRules::new();
    let builder = RelationBuilder::new(&rules);
    let mut model = school_shop_model();
    assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 8);
    let links_before = snapshot(&model);

    model.store_entity(
        Entity::new("AAA_DRAFTS", "AaaDrafts")
            .with_attribute(pk("ID", 1))
            .with_attribute(column("SHOP_ID", 2))
            .with_foreign_key(fk("FK_DRAFT_SHOP", "AAA_DRAFTS", "SHOPS", "SHOP_ID")),
    );
    let err = builder.rebuild_all_links(&mut model).unwrap_err();
    assert!(matches!(err, Error::ReferencedEntityNotFound { .. }));
    // Links of the tables sorting after the failing one survive.
    assert_eq!(model.links_count(), 8);
    assert_eq!(snapshot(&model), links_before);

    model.remove_entity("AAA_DRAFTS");
    model.remove_entity("PRODUCTS");
    let err = builder.rebuild_all_links(&mut model).unwrap_err();
    match err {
        Error::ReferencedEntityNotFound {
            foreign_key,
            table,
            referenced_table,
        } => {
            assert_eq!(foreign_key, "FK_LINE_PRODUCT");
            assert_eq!(table, "ORDER_LINE");
            assert_eq!(referenced_table, "PRODUCTS");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_deleting_an_entity_removes_every_link_touching_it() {
    let rules = DefaultRules::new();
    let mut model = school_shop_model();
    RelationBuilder::new(&rules).rebuild_all_links(&mut model).unwrap();

    let orders = model.entity("ORDERS").unwrap().clone();
    let log = ChangeLog::new().with_change(EntityChange::Deleted(orders));
    // ORDERS -> CUSTOMERS pair and ORDER_LINE -> ORDERS pair
    assert_eq!(LinkUpdater::new(&rules).apply_change_log(&mut model, &log).unwrap(), 4);

    assert!(model.all_links().iter().all(|l| !l.uses_table("ORDERS")));
    assert_eq!(model.entity("CUSTOMERS").unwrap().links_count(), 0);
    assert_eq!(model.entity("ORDER_LINE").unwrap().links_count(), 1);
    assert_eq!(model.links_count(), 4);
}

#[test]
fn test_deleting_a_join_table_removes_its_relation() {
    let rules = DefaultRules::new();
    let mut model = school_shop_model();
    RelationBuilder::new(&rules).rebuild_all_links(&mut model).unwrap();

    let join = model.entity("STUDENT_COURSE").unwrap().clone();
    let log = ChangeLog::new().with_change(EntityChange::Deleted(join));
    assert_eq!(LinkUpdater::new(&rules).apply_change_log(&mut model, &log).unwrap(), 2);

    assert_eq!(model.entity("STUDENTS").unwrap().links_count(), 0);
    assert_eq!(model.entity("COURSES").unwrap().links_count(), 0);
}
