pub const CREATE_CATEGORIES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Categories (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        CategoryName TEXT NOT NULL,
        ParentCategoryId INTEGER,
        FOREIGN KEY (ParentCategoryId) REFERENCES Categories (Id)
    )
";

pub const CREATE_TAGS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Tags (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        TagName TEXT NOT NULL UNIQUE COLLATE NOCASE,
        Color TEXT
    )
";

pub const CREATE_ASSETS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Assets (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL,
        FilePath TEXT NOT NULL UNIQUE,
        ThumbnailPath TEXT,
        FileSize INTEGER NOT NULL DEFAULT 0,
        DateCreated TEXT NOT NULL,
        DateModified TEXT NOT NULL,
        DateAdded TEXT NOT NULL,
        AssetType TEXT NOT NULL DEFAULT '',
        Description TEXT NOT NULL DEFAULT '',
        CategoryId INTEGER,
        FOREIGN KEY (CategoryId) REFERENCES Categories (Id)
    )
";

pub const CREATE_ASSET_TAGS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS AssetTags (
        AssetId INTEGER NOT NULL,
        TagId INTEGER NOT NULL,
        PRIMARY KEY (AssetId, TagId),
        FOREIGN KEY (AssetId) REFERENCES Assets (Id) ON DELETE CASCADE,
        FOREIGN KEY (TagId) REFERENCES Tags (Id) ON DELETE CASCADE
    )
";

pub const CREATE_INDEX_ASSET_CATEGORY: &str =
    "CREATE INDEX IF NOT EXISTS idx_assets_category ON Assets(CategoryId)";

pub const CREATE_INDEX_CATEGORY_PARENT: &str =
    "CREATE INDEX IF NOT EXISTS idx_categories_parent ON Categories(ParentCategoryId)";

pub const CREATE_INDEX_ASSET_TAGS_TAG: &str =
    "CREATE INDEX IF NOT EXISTS idx_asset_tags_tag ON AssetTags(TagId)";

/// Seeded into an empty Categories table: `(name, parent name)`.
/// Parents precede their children.
pub const DEFAULT_CATEGORIES: &[(&str, Option<&str>)] = &[
    ("Textures", None),
    ("Models", None),
    ("Audio", None),
    ("Scripts", None),
    ("UI", Some("Textures")),
    ("Environment", Some("Textures")),
    ("Characters", Some("Models")),
    ("Props", Some("Models")),
    ("Music", Some("Audio")),
    ("SFX", Some("Audio")),
];
