//! Field type registry.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Registry, Result};

/// Storage backend a field type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain `django.db.models` storage.
    Default,
    /// Requires the PostgreSQL contrib extension.
    Postgres,
    /// A PostgreSQL range type (implies [`Backend::Postgres`]).
    PostgresRange,
}

impl Backend {
    /// Check if this backend needs the PostgreSQL extension.
    pub fn is_postgres(self) -> bool {
        matches!(self, Backend::Postgres | Backend::PostgresRange)
    }

    /// Check if this backend is a range extension type.
    pub fn is_range(self) -> bool {
        self == Backend::PostgresRange
    }
}

/// A registered field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    /// Registry key (the bare class name, e.g. `CharField`).
    pub key: &'static str,
    /// Fully qualified Django class.
    pub class_path: &'static str,
    /// Construction arguments suggested when the user has not typed any.
    pub default_args: Option<&'static str>,
    /// Storage backend classification.
    pub backend: Backend,
    /// Python literal used when generating tests.
    pub test_default: Option<&'static str>,
    /// Python expression used when generating views.
    pub view_default: Option<&'static str>,
}

impl FieldType {
    const fn new(key: &'static str, class_path: &'static str) -> Self {
        Self {
            key,
            class_path,
            default_args: None,
            backend: Backend::Default,
            test_default: None,
            view_default: None,
        }
    }

    const fn args(mut self, args: &'static str) -> Self {
        self.default_args = Some(args);
        self
    }

    const fn test(mut self, value: &'static str) -> Self {
        self.test_default = Some(value);
        self
    }

    const fn view(mut self, value: &'static str) -> Self {
        self.view_default = Some(value);
        self
    }

    const fn postgres(mut self) -> Self {
        self.backend = Backend::Postgres;
        self
    }

    const fn range(mut self) -> Self {
        self.backend = Backend::PostgresRange;
        self
    }

    /// Look up a field type by registry key.
    pub fn lookup(key: &str) -> Result<&'static FieldType> {
        INDEX
            .get(key)
            .copied()
            .ok_or_else(|| Error::registry_miss(Registry::FieldType, key))
    }

    /// All registered field types, in registry order.
    pub fn all() -> &'static [FieldType] {
        &FIELD_TYPES
    }

    /// Check if this type needs the PostgreSQL extension.
    pub fn is_postgres(&self) -> bool {
        self.backend.is_postgres()
    }

    /// Check if this type is a PostgreSQL range type.
    pub fn is_postgres_range(&self) -> bool {
        self.backend.is_range()
    }

    /// Check if this is an auto-incrementing primary key type.
    pub fn is_auto(&self) -> bool {
        AUTO_TYPES.contains(&self.key)
    }

    /// Check if this is the slug type.
    pub fn is_slug(&self) -> bool {
        self.key == SLUG_TYPE
    }
}

const SLUG_TYPE: &str = "SlugField";

const AUTO_TYPES: [&str; 2] = ["AutoField", "BigAutoField"];

static FIELD_TYPES: [FieldType; 49] = [
    FieldType::new("EmailField", "django.db.models.EmailField").test("'user@tempurl.com'"),
    FieldType::new("TextField", "django.db.models.TextField")
        .args("max_length=100")
        .test("'some\\ntext'"),
    FieldType::new("CharField", "django.db.models.CharField")
        .args("max_length=30")
        .test("'text'"),
    FieldType::new("SlugField", "django.db.models.SlugField").test("'slug'"),
    FieldType::new("URLField", "django.db.models.URLField").test("'http://127.0.0.1'"),
    FieldType::new("UUIDField", "django.db.models.UUIDField").test("uuid.uuid4()"),
    FieldType::new("DateField", "django.db.models.DateField").test("'2022-01-01'"),
    FieldType::new("DateTimeField", "django.db.models.DateTimeField")
        .test("'2022-01-01:09:00:00'"),
    FieldType::new("AutoField", "django.db.models.AutoField").args("primary_key=True"),
    FieldType::new(
        "CommaSeparatedIntegerField",
        "django.db.models.CommaSeparatedIntegerField",
    ),
    FieldType::new("BigAutoField", "django.db.models.BigAutoField").args("primary_key=True"),
    FieldType::new("BigIntegerField", "django.db.models.BigIntegerField").test("1000"),
    FieldType::new("BooleanField", "django.db.models.BooleanField").test("True"),
    FieldType::new("DecimalField", "django.db.models.DecimalField")
        .args("max_digits=10, decimal_places=2")
        .test("1.0"),
    FieldType::new("DurationField", "django.db.models.DurationField").test("timedelta(days=1)"),
    FieldType::new("FileField", "django.db.models.FileField")
        .args("upload_to=\"upload/files/\"")
        .test("'aFile'"),
    FieldType::new("ImageField", "django.db.models.ImageField")
        .args("upload_to=\"upload/images/\"")
        .test("'anImage'"),
    FieldType::new("FilePathField", "django.db.models.FilePathField"),
    FieldType::new("FloatField", "django.db.models.FloatField").test("1.1"),
    FieldType::new("IntegerField", "django.db.models.IntegerField").test("1"),
    FieldType::new("PositiveIntegerField", "django.db.models.PositiveIntegerField").test("1"),
    FieldType::new(
        "PositiveSmallIntegerField",
        "django.db.models.PositiveSmallIntegerField",
    )
    .test("1"),
    FieldType::new("IPAddressField", "django.db.models.IPAddressField"),
    FieldType::new("GenericIPAddressField", "django.db.models.GenericIPAddressField")
        .test("'127.0.0.1'"),
    FieldType::new("NullBooleanField", "django.db.models.NullBooleanField"),
    FieldType::new("TimeField", "django.db.models.TimeField").test("time()"),
    FieldType::new("BinaryField", "django.db.models.BinaryField"),
    FieldType::new("SmallIntegerField", "django.db.models.SmallIntegerField").test("1"),
    FieldType::new("JSONField", "django.db.models.JSONField")
        .args("default=dict")
        .test("'{\"value\": \"key\"}'"),
    FieldType::new(
        "GenericForeignKey",
        "django.contrib.contenttypes.fields.GenericForeignKey",
    )
    .args("\"content_type\", \"object_id\""),
    FieldType::new("ArrayField", "django.contrib.postgres.fields.ArrayField")
        .args("models.CharField(max_length=100)")
        .test("[1, 2, 3]")
        .postgres(),
    FieldType::new("CICharField", "django.contrib.postgres.fields.CICharField")
        .args("max_length=30")
        .test("'text'")
        .postgres(),
    FieldType::new("CIEmailField", "django.contrib.postgres.fields.CIEmailField")
        .test("'user@tempurl.com'")
        .postgres(),
    FieldType::new("CITextField", "django.contrib.postgres.fields.CITextField")
        .test("'some\\ntext'")
        .postgres(),
    FieldType::new("HStoreField", "django.contrib.postgres.fields.HStoreField")
        .test("{}")
        .postgres(),
    FieldType::new(
        "IntegerRangeField",
        "django.contrib.postgres.fields.ranges.IntegerRangeField",
    )
    .test("[0, 10]")
    .view("NumericRange(0, 10)")
    .range(),
    FieldType::new(
        "BigIntegerRangeField",
        "django.contrib.postgres.fields.ranges.BigIntegerRangeField",
    )
    .test("[0, 1000]")
    .view("NumericRange(0, 1000)")
    .range(),
    FieldType::new(
        "FloatRangeField",
        "django.contrib.postgres.fields.ranges.FloatRangeField",
    )
    .range(),
    FieldType::new(
        "DateTimeRangeField",
        "django.contrib.postgres.fields.ranges.DateTimeRangeField",
    )
    .test("['2022-01-01:09:00:00', '2022-02-02:09:00:00']")
    .view("DateTimeTZRange()")
    .range(),
    FieldType::new(
        "DateRangeField",
        "django.contrib.postgres.fields.ranges.DateRangeField",
    )
    .test("['2022-01-01', '2022-02-02']")
    .view("DateRange()")
    .range(),
    FieldType::new("GeometryField", "django.contrib.gis.db.GeometryField"),
    FieldType::new("PointField", "django.contrib.gis.db.PointField"),
    FieldType::new("LineStringField", "django.contrib.gis.db.LineStringField"),
    FieldType::new("PolygonField", "django.contrib.gis.db.PolygonField"),
    FieldType::new("MultiPointField", "django.contrib.gis.db.MultiPointField"),
    FieldType::new("MultiLineStringField", "django.contrib.gis.db.MultiLineStringField"),
    FieldType::new("MultiPolygonField", "django.contrib.gis.db.MultiPolygonField"),
    FieldType::new(
        "GeometryCollectionField",
        "django.contrib.gis.db.GeometryCollectionField",
    ),
    FieldType::new("RasterField", "django.contrib.gis.db.RasterField"),
];

static INDEX: LazyLock<HashMap<&'static str, &'static FieldType>> =
    LazyLock::new(|| FIELD_TYPES.iter().map(|t| (t.key, t)).collect());
