//! Integration tests for snapshotting and rebuilding project graphs.

use djangobuilder_core::{
    BuiltInModel, DjangoVersion, FieldType, ParentModelType, Project, ProjectOptions,
    RelationshipKind, RelationshipType,
};
use djangobuilder_records::{
    rebuild, snapshot, snapshot_into, ChangeKind, EntityType, RebuildConfig, RecordChange,
    RecordStore,
};
use pretty_assertions::assert_eq;

/// Everything a rebuild must reproduce, in graph order.
fn shape(project: &Project) -> Vec<String> {
    let mut lines = vec![format!(
        "project {} {} channels={} htmx={} postgres={}",
        project.name(),
        project.version(),
        project.channels(),
        project.htmx(),
        project.postgres()
    )];
    for app in project.apps() {
        lines.push(format!("app {}", app.name()));
        for model in app.models() {
            lines.push(format!(
                "model {} abstract={} name_field={} pk={}",
                model.name(),
                model.is_abstract(),
                model.name_field(),
                model.primary_key()
            ));
            for field in model.fields() {
                lines.push(format!(
                    "field {} {} [{}] editable={}",
                    field.name(),
                    field.field_type().key,
                    field.args(),
                    field.is_editable()
                ));
            }
            for relationship in model.relationships() {
                lines.push(format!(
                    "relationship {} {} -> {}",
                    relationship.name(),
                    relationship.relationship_type().key,
                    project.related_to(relationship).unwrap()
                ));
            }
            for parent in model.parents() {
                lines.push(format!("parent {}", project.parent_label(parent).unwrap()));
            }
        }
    }
    lines
}

fn store_project() -> Project {
    let options = ProjectOptions::default().channels(false);
    let mut project = Project::new("store", "An online shop", DjangoVersion::V3, options);

    let accounts = project.add_app("accounts").unwrap();
    let profile = project.add_model(accounts, "Profile", false).unwrap();
    project
        .add_parent(
            profile,
            ParentModelType::lookup("django.contrib.auth.models.AbstractUser").unwrap(),
        )
        .unwrap();

    let shop = project.add_app("shop").unwrap();
    let stamped = project.add_model(shop, "Stamped", true).unwrap();
    project
        .add_field(
            stamped,
            "created",
            FieldType::lookup("DateTimeField").unwrap(),
            "auto_now_add=True",
            false,
        )
        .unwrap();

    let order = project.add_model(shop, "Order", false).unwrap();
    project.add_parent(order, stamped).unwrap();
    project
        .add_field(order, "code", FieldType::lookup("SlugField").unwrap(), "", true)
        .unwrap();
    project
        .add_field(
            order,
            "window",
            FieldType::lookup("DateTimeRangeField").unwrap(),
            "",
            true,
        )
        .unwrap();
    project
        .add_relationship(
            order,
            "customer",
            RelationshipType::of(RelationshipKind::ForeignKey),
            profile,
            "on_delete=models.CASCADE",
        )
        .unwrap();
    project
        .add_relationship(
            order,
            "groups",
            RelationshipType::of(RelationshipKind::ManyToMany),
            BuiltInModel::lookup("django.contrib.auth.models.Group").unwrap(),
            "",
        )
        .unwrap();
    project
        .add_relationship(
            order,
            "owner",
            RelationshipType::of(RelationshipKind::OneToOne),
            BuiltInModel::auth_user(),
            "on_delete=models.CASCADE",
        )
        .unwrap();
    project.set_name_field(order, "code").unwrap();
    project.set_primary_key(order, "code").unwrap();
    project
}

#[test]
fn test_round_trip_preserves_shape() {
    let original = store_project();
    let store = snapshot(&original, "p1").unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::default()).unwrap();

    let copy = &rebuilt.projects["p1"];
    assert_eq!(shape(copy), shape(&original));
    assert_eq!(copy.description(), "An online shop");
    assert_eq!(copy.middleware(), original.middleware());
    assert_ne!(copy.key(), original.key());
}

#[test]
fn test_round_trip_through_json() {
    let original = store_project();
    let json = snapshot(&original, "p1").unwrap().to_json().unwrap();
    let store = RecordStore::from_json(&json).unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::lenient()).unwrap();
    assert_eq!(shape(&rebuilt.projects["p1"]), shape(&original));
}

#[test]
fn test_round_trip_app_named_like_builtin_module() {
    let mut project = Project::with_defaults("store");
    let models = project.add_app("models").unwrap();
    let local_user = project.add_model(models, "User", false).unwrap();
    project.add_model(models, "Group", false).unwrap();
    project.add_model(models, "AbstractUser", true).unwrap();

    let shop = project.add_app("shop").unwrap();
    let order = project.add_model(shop, "Order", false).unwrap();
    project
        .add_relationship(
            order,
            "owner",
            RelationshipType::of(RelationshipKind::ForeignKey),
            BuiltInModel::auth_user(),
            "",
        )
        .unwrap();
    project
        .add_relationship(
            order,
            "groups",
            RelationshipType::of(RelationshipKind::ManyToMany),
            BuiltInModel::lookup("django.contrib.auth.models.Group").unwrap(),
            "",
        )
        .unwrap();
    project
        .add_relationship(
            order,
            "buyer",
            RelationshipType::of(RelationshipKind::ForeignKey),
            local_user,
            "",
        )
        .unwrap();
    project
        .add_parent(
            order,
            ParentModelType::lookup("django.contrib.auth.models.AbstractUser").unwrap(),
        )
        .unwrap();

    let store = snapshot(&project, "p1").unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::default()).unwrap();
    let copy = &rebuilt.projects["p1"];
    assert_eq!(shape(copy), shape(&project));

    let order = copy.find_model("shop", "Order").unwrap();
    let owner = order.get_relationship("owner").unwrap();
    assert_eq!(copy.related_to(owner).unwrap(), "auth.User");
    let buyer = order.get_relationship("buyer").unwrap();
    assert_eq!(copy.related_to(buyer).unwrap(), "models.User");
}

#[test]
fn test_index_maps_back_to_snapshot_ids() {
    let original = store_project();
    let store = snapshot(&original, "p1").unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::default()).unwrap();
    let copy = &rebuilt.projects["p1"];

    for model in copy.models() {
        let record_id = rebuilt.index.model(model.id()).unwrap();
        assert_eq!(store.models[record_id].name, model.name());
        for field in model.fields() {
            let record_id = rebuilt.index.field(field.id()).unwrap();
            assert_eq!(store.fields[record_id].name, field.name());
        }
    }
}

#[test]
fn test_change_feed_rebuild() {
    let feed = r#"[
        {"kind": "added", "entity": "project", "id": "p1",
         "data": {"name": "blog", "django_version": "2.2", "apps": ["a1"]}},
        {"kind": "added", "entity": "app", "id": "a1",
         "data": {"name": "posts", "models": ["m1"]}},
        {"kind": "added", "entity": "model", "id": "m1",
         "data": {"name": "Post", "fields": ["f1", "f2"], "relationships": ["r1"]}},
        {"kind": "added", "entity": "field", "id": "f1",
         "data": {"name": "title", "type": "django.db.models.CharField", "args": "max_length=30"}},
        {"kind": "added", "entity": "field", "id": "f2",
         "data": {"name": "tags", "type": "django.contrib.postgres.fields.ArrayField"}},
        {"kind": "added", "entity": "relationship", "id": "r1",
         "data": {"name": "author", "type": "django.db.models.ForeignKey",
                  "to": "django.contrib.auth.models.User"}},
        {"kind": "modified", "entity": "model", "id": "m1",
         "data": {"name": "Post", "fields": ["f1", "f2"], "relationships": ["r1"],
                  "name_field": "title"}}
    ]"#;
    let changes: Vec<RecordChange> = serde_json::from_str(feed).unwrap();
    assert_eq!(changes[6].kind, ChangeKind::Modified);

    let mut store = RecordStore::new();
    store.apply_batch(&changes).unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::default()).unwrap();
    let blog = &rebuilt.projects["p1"];

    assert_eq!(blog.version(), DjangoVersion::V2);
    let post = blog.find_model("posts", "Post").unwrap();
    assert_eq!(post.name_field(), "title");
    assert!(post.get_field("tags").unwrap().is_postgres_field());
    assert_eq!(
        blog.related_to(post.get_relationship("author").unwrap()).unwrap(),
        "auth.User"
    );
}

#[test]
fn test_cascade_removal_after_snapshot() {
    let original = store_project();
    let mut store = snapshot(&original, "p1").unwrap();
    snapshot_into(&original, "p2", &mut store).unwrap();

    let cascade = store.project_cascade("p1");
    assert_eq!(cascade.apps.len(), 2);
    assert_eq!(cascade.models.len(), 3);

    let before = store.len();
    let removed = store.remove_project("p1");
    assert_eq!(store.len(), before - removed.len() - 1);

    store.apply(&RecordChange::removed(EntityType::Project, "p2")).unwrap();
    let rebuilt = rebuild(&store, RebuildConfig::default()).unwrap();
    assert!(rebuilt.projects.is_empty());
}
