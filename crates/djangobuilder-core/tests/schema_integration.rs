//! Integration tests for building and querying project graphs.

use djangobuilder_core::{
    BuiltInModel, DjangoVersion, Error, FieldType, ImportModule, ModelParent, ParentModelType,
    Project, ProjectOptions, RelationshipKind, RelationshipTarget, RelationshipType,
    SharedProject, PK_SENTINEL,
};
use pretty_assertions::assert_eq;

fn field_type(key: &str) -> &'static FieldType {
    FieldType::lookup(key).unwrap()
}

#[test]
fn test_shop_order_scenario() {
    let mut project = Project::with_defaults("store");
    let shop = project.add_app("shop").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    project
        .add_field(order, "total", field_type("DecimalField"), "", true)
        .unwrap();
    project
        .add_relationship(
            order,
            "customer",
            RelationshipType::lookup("ForeignKey").unwrap(),
            BuiltInModel::auth_user(),
            "",
        )
        .unwrap();

    let model = project.model(order).unwrap();
    assert_eq!(model.field_names().collect::<Vec<_>>(), vec!["total"]);
    assert_eq!(model.relationships().len(), 1);

    let customer = model.get_relationship("customer").unwrap();
    assert_eq!(
        project.related_to(customer).unwrap(),
        BuiltInModel::auth_user().label
    );
}

#[test]
fn test_middleware_lists_are_independent() {
    let options = ProjectOptions::default().htmx(true);
    let mut first = Project::new("one", "", DjangoVersion::V4, options);
    let second = Project::new("two", "", DjangoVersion::V4, options);
    let before = second.middleware().to_vec();

    first.middleware_mut().push("custom.Middleware".to_string());
    first.middleware_mut().remove(0);

    assert_eq!(second.middleware(), before.as_slice());
    assert_eq!(
        second.middleware().last().map(String::as_str),
        Some("django_htmx.middleware.HtmxMiddleware")
    );
}

#[test]
fn test_unknown_name_field_leaves_model_untouched() {
    let mut project = Project::with_defaults("store");
    let shop = project.add_app("shop").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    project
        .add_field(order, "reference", field_type("CharField"), "max_length=30", true)
        .unwrap();

    let err = project.set_name_field(order, "title").unwrap_err();
    assert!(err.is_reference_not_found());
    assert_eq!(
        err,
        Error::FieldNotFound {
            field: "title".to_string(),
            model: "Order".to_string(),
        }
    );
    assert_eq!(project.model(order).unwrap().name_field(), PK_SENTINEL);
}

#[test]
fn test_model_target_label() {
    let mut project = Project::with_defaults("store");
    let shop = project.add_app("shop").unwrap();
    let crm = project.add_app("crm").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    let invoice = project.add_model(crm, "Invoice", false).unwrap();
    let rel = project
        .add_relationship(
            invoice,
            "order",
            RelationshipType::of(RelationshipKind::OneToOne),
            order,
            "",
        )
        .unwrap();

    let relationship = project.relationship(rel).unwrap();
    assert_eq!(project.related_to(relationship).unwrap(), "shop.Order");
}

#[test]
fn test_builtin_label_independent_of_owner() {
    let mut project = Project::with_defaults("store");
    let mut labels = Vec::new();
    for (app_name, model_name) in [("shop", "Order"), ("blog", "Post"), ("crm", "Lead")] {
        let app = project.add_app(app_name).unwrap();
        let model = project.add_model(app, model_name, false).unwrap();
        let rel = project
            .add_relationship(
                model,
                "owner",
                RelationshipType::of(RelationshipKind::ManyToMany),
                BuiltInModel::auth_user(),
                "",
            )
            .unwrap();
        labels.push(project.related_to(project.relationship(rel).unwrap()).unwrap());
    }
    assert_eq!(labels, vec!["auth.User"; 3]);
}

#[test]
fn test_import_module_for_every_registered_type() {
    let mut project = Project::with_defaults("catalog");
    let app = project.add_app("everything").unwrap();
    let model = project.add_model(app, "Sample", false).unwrap();

    for (index, ty) in FieldType::all().iter().enumerate() {
        let field = project
            .add_field(model, format!("field_{index}"), ty, "", true)
            .unwrap();
        let expected = if ty.is_postgres_range() {
            ImportModule::PostgresRangeFields
        } else if ty.is_postgres() {
            ImportModule::PostgresFields
        } else {
            ImportModule::Models
        };
        assert_eq!(
            project.field(field).unwrap().import_module(),
            expected,
            "{}",
            ty.key
        );
    }
    assert!(project.requires_postgres());
}

#[test]
fn test_ids_from_another_project_are_rejected() {
    let mut first = Project::with_defaults("one");
    let mut second = Project::with_defaults("two");
    let app = first.add_app("shop").unwrap();
    let order = first.add_model(app, "Order", false).unwrap();
    let other_app = second.add_app("shop").unwrap();
    let other = second.add_model(other_app, "Order", false).unwrap();

    assert!(matches!(
        second.add_model(app, "Cart", false),
        Err(Error::ForeignReference { .. })
    ));
    let err = second
        .add_relationship(
            other,
            "order",
            RelationshipType::of(RelationshipKind::ForeignKey),
            order,
            "",
        )
        .unwrap_err();
    assert!(err.is_invariant_violation());
}

#[test]
fn test_removal_and_dangling_targets() {
    let mut project = Project::with_defaults("store");
    let shop = project.add_app("shop").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    let line = project.add_model(shop, "Line", false).unwrap();
    let rel = project
        .add_relationship(
            line,
            "order",
            RelationshipType::of(RelationshipKind::ForeignKey),
            order,
            "",
        )
        .unwrap();

    project.remove_model(order).unwrap();
    assert_eq!(project.dangling_relationships(), vec![rel]);
    let relationship = project.relationship(rel).unwrap();
    assert!(matches!(
        relationship.target(),
        RelationshipTarget::Model(id) if id == order
    ));
    assert!(project.related_to(relationship).unwrap_err().is_reference_not_found());

    project.remove_app(shop).unwrap();
    assert!(project.apps().is_empty());
    assert!(project.dangling_relationships().is_empty());
}

#[test]
fn test_rename_is_reflected_in_labels() {
    let mut project = Project::with_defaults("store");
    let shop = project.add_app("shop").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    let profile = project.add_model(shop, "Profile", false).unwrap();
    project.add_parent(profile, order).unwrap();
    project
        .add_parent(
            profile,
            ParentModelType::lookup("django.contrib.auth.models.AbstractUser").unwrap(),
        )
        .unwrap();

    project.rename_app(shop, "sales").unwrap();
    project.rename_model(order, "Purchase").unwrap();

    let parents: Vec<String> = project
        .model(profile)
        .unwrap()
        .parents()
        .iter()
        .map(|p| project.parent_label(p).unwrap())
        .collect();
    assert_eq!(
        parents,
        vec!["sales.Purchase", "django.contrib.auth.models.AbstractUser"]
    );
    assert!(matches!(
        project.model(profile).unwrap().parents()[1],
        ModelParent::Framework(_)
    ));
}

#[test]
fn test_shared_project_edits() {
    let shared = SharedProject::new(Project::with_defaults("store"));
    let shop = shared.update(|p| p.add_app("shop")).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                shared
                    .update(|p| p.add_model(shop, format!("Model{i}"), false))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.read().app(shop).unwrap().models().len(), 4);
}
