//! Seed data for the integration tests.
//!
//! Languages: `eng-GB` (2), `ger-DE` (4), `fre-FR` (16).
//!
//! Content tree (node id: content id, path):
//!
//! ```text
//! 2:  1   Home            /1/2/
//! 42: 20  Rust Rocks      /1/2/42/
//! 44: 22  Hello Blog      /1/2/42/44/
//! 43: 21  Zweiter Artikel /1/2/43/        hidden
//! 45: 20  (secondary)     /1/2/43/45/     invisible
//! 12: 10  Administrators  /1/12/
//! 15: 14  admin           /1/12/15/
//! 13: 11  Editors         /1/13/
//! 16: 15  editor          /1/13/16/
//! ```
//!
//! Content 20 has titles in English, German and French; its main language
//! is English. Content 23 is an unpublished draft, content 24 sits in the trash as
//! node 60.

use ibexa_legacy_search::backends::sqlite::SqliteDatabase;

/// `eng-GB` language bit.
pub const ENG: i64 = 2;
/// `ger-DE` language bit.
pub const GER: i64 = 4;
/// `fre-FR` language bit.
pub const FRE: i64 = 16;

/// Published content items, ascending.
pub const PUBLISHED_CONTENT: &[i64] = &[1, 10, 11, 14, 15, 20, 21, 22];

const LANGUAGES: &str = "
    INSERT INTO ezcontent_language (id, locale, name) VALUES (2, 'eng-GB', 'English (United Kingdom)');
    INSERT INTO ezcontent_language (id, locale, name) VALUES (4, 'ger-DE', 'German');
    INSERT INTO ezcontent_language (id, locale, name) VALUES (16, 'fre-FR', 'French');
";

const SECTIONS: &str = "
    INSERT INTO ezsection (id, identifier, name) VALUES (1, 'standard', 'Standard');
    INSERT INTO ezsection (id, identifier, name) VALUES (2, 'users', 'Users');
    INSERT INTO ezsection (id, identifier, name) VALUES (3, 'media', 'Media');
";

const CONTENT_TYPES: &str = "
    INSERT INTO ezcontentclassgroup (id, name, is_system) VALUES (1, 'Content', 0);
    INSERT INTO ezcontentclassgroup (id, name, is_system) VALUES (2, 'Users', 0);
    INSERT INTO ezcontentclassgroup (id, name, is_system) VALUES (3, 'Setup', 1);

    INSERT INTO ezcontentclass (id, version, identifier) VALUES (1, 0, 'folder');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (2, 0, 'article');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (3, 0, 'user_group');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (4, 0, 'user');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (5, 0, 'blog_post');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (6, 0, 'template_look');
    INSERT INTO ezcontentclass (id, version, identifier) VALUES (7, 1, 'draft_type');

    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (1, 0, 1, 'Content');
    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (2, 0, 1, 'Content');
    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (5, 0, 1, 'Content');
    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (3, 0, 2, 'Users');
    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (4, 0, 2, 'Users');
    INSERT INTO ezcontentclass_classgroup (contentclass_id, contentclass_version, group_id, group_name)
        VALUES (6, 0, 3, 'Setup');

    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (4, 0, 1, 'name', 'ezstring', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (10, 0, 2, 'title', 'ezstring', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (11, 0, 2, 'body', 'eztext', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (12, 0, 2, 'rating', 'ezinteger', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (13, 0, 2, 'image', 'ezimage', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (14, 0, 2, 'publish_date', 'ezdate', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (15, 0, 2, 'notes', 'eztext', 0);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (20, 0, 3, 'name', 'ezstring', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (30, 0, 4, 'first_name', 'ezstring', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (31, 0, 4, 'image', 'ezimage', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (40, 0, 5, 'title', 'ezstring', 1);
    INSERT INTO ezcontentclass_attribute (id, version, contentclass_id, identifier, data_type_string, is_searchable)
        VALUES (41, 0, 5, 'rating', 'ezfloat', 1);
";

const CONTENT: &str = "
    INSERT INTO ezcontentobject
        (id, contentclass_id, section_id, owner_id, remote_id, name, current_version,
         initial_language_id, language_mask, published, modified, status)
    VALUES
        (1,  1, 1, 14, 'home',       'Home',            1, 2,  3,  1000, 1500, 1),
        (10, 3, 2, 14, 'admins',     'Administrators',  1, 2,  3,  900,  900,  1),
        (11, 3, 2, 14, 'editors',    'Editors',         1, 2,  3,  900,  900,  1),
        (14, 4, 2, 14, 'admin',      'admin',           1, 2,  3,  900,  900,  1),
        (15, 4, 2, 15, 'editor',     'editor',          1, 2,  3,  950,  950,  1),
        (20, 2, 1, 14, 'rust-rocks', 'Rust Rocks',      1, 2,  22, 2000, 2500, 1),
        (21, 2, 1, 15, 'zweiter',    'Zweiter Artikel', 1, 4,  4,  3000, 3500, 1),
        (22, 5, 3, 14, 'hello-blog', 'Hello Blog',      1, 16, 18, 4000, 4000, 1),
        (23, 2, 1, 14, 'draft',      'Draft',           1, 2,  2,  0,    4100, 0),
        (24, 2, 1, 14, 'binned',     'Binned',          1, 2,  2,  1200, 4500, 2);

    INSERT INTO ezcontentobject_version (contentobject_id, version, creator_id, status)
    VALUES
        (1, 1, 14, 1), (10, 1, 14, 1), (11, 1, 14, 1), (14, 1, 14, 1), (15, 1, 15, 1),
        (20, 1, 15, 1), (21, 1, 15, 1), (22, 1, 14, 1), (23, 1, 14, 0), (24, 1, 14, 1);

    INSERT INTO ezcontentobject_name (contentobject_id, content_version, content_translation, language_id, name)
    VALUES
        (1,  1, 'eng-GB', 3,  'Home'),
        (20, 1, 'eng-GB', 2,  'Rust Rocks'),
        (20, 1, 'ger-DE', 4,  'Rost Rockt'),
        (21, 1, 'ger-DE', 4,  'Zweiter Artikel'),
        (22, 1, 'fre-FR', 16, 'Bonjour Blog'),
        (22, 1, 'eng-GB', 2,  'Hello Blog');

    INSERT INTO ezcobj_state_link (contentobject_id, contentobject_state_id)
    VALUES (20, 1), (21, 2), (22, 1);
";

const FIELDS: &str = "
    INSERT INTO ezcontentobject_attribute
        (id, version, contentobject_id, contentclassattribute_id, data_type_string,
         language_code, language_id, data_float, data_int, sort_key_int, sort_key_string)
    VALUES
        (100, 1, 1,  4,  'ezstring',  'eng-GB', 3,  NULL, NULL,       0, 'home'),
        (200, 1, 20, 10, 'ezstring',  'eng-GB', 2,  NULL, NULL,       0, 'rust rocks'),
        (201, 1, 20, 10, 'ezstring',  'ger-DE', 4,  NULL, NULL,       0, 'rost rockt'),
        (202, 1, 20, 11, 'eztext',    'eng-GB', 2,  NULL, NULL,       0, 'body en'),
        (203, 1, 20, 11, 'eztext',    'ger-DE', 4,  NULL, NULL,       0, 'body de'),
        (204, 1, 20, 12, 'ezinteger', 'eng-GB', 2,  NULL, 5,          5, ''),
        (205, 1, 20, 12, 'ezinteger', 'ger-DE', 4,  NULL, 5,          5, ''),
        (206, 1, 20, 14, 'ezdate',    'eng-GB', 2,  NULL, 1700000000, 1700000000, ''),
        (207, 1, 20, 10, 'ezstring',  'fre-FR', 16, NULL, NULL,       0, 'la rouille'),
        (210, 1, 21, 10, 'ezstring',  'ger-DE', 4,  NULL, NULL,       0, 'zweiter artikel'),
        (211, 1, 21, 11, 'eztext',    'ger-DE', 4,  NULL, NULL,       0, ''),
        (212, 1, 21, 12, 'ezinteger', 'ger-DE', 4,  NULL, 3,          3, ''),
        (220, 1, 22, 40, 'ezstring',  'fre-FR', 16, NULL, NULL,       0, 'bonjour blog'),
        (221, 1, 22, 40, 'ezstring',  'eng-GB', 2,  NULL, NULL,       0, 'hello blog'),
        (222, 1, 22, 41, 'ezfloat',   'fre-FR', 16, 4.5,  NULL,       0, ''),
        (223, 1, 22, 41, 'ezfloat',   'eng-GB', 2,  4.5,  NULL,       0, '');
";

const TREE: &str = "
    INSERT INTO ezcontentobject_tree
        (node_id, parent_node_id, main_node_id, contentobject_id, depth, path_string,
         priority, remote_id, is_hidden, is_invisible)
    VALUES
        (1,  1,  1,  0,  0, '/1/',          0,  'root',    0, 0),
        (2,  1,  2,  1,  1, '/1/2/',        0,  'loc-2',   0, 0),
        (12, 1,  12, 10, 1, '/1/12/',       0,  'loc-12',  0, 0),
        (13, 1,  13, 11, 1, '/1/13/',       0,  'loc-13',  0, 0),
        (15, 12, 15, 14, 2, '/1/12/15/',    0,  'loc-15',  0, 0),
        (16, 13, 16, 15, 2, '/1/13/16/',    0,  'loc-16',  0, 0),
        (42, 2,  42, 20, 2, '/1/2/42/',     0,  'loc-42',  0, 0),
        (43, 2,  43, 21, 2, '/1/2/43/',     10, 'loc-43',  1, 1),
        (44, 42, 44, 22, 3, '/1/2/42/44/',  5,  'loc-44',  0, 0),
        (45, 43, 42, 20, 3, '/1/2/43/45/',  0,  'loc-45',  0, 1);

    INSERT INTO ezcontentobject_trash
        (node_id, parent_node_id, main_node_id, contentobject_id, depth, path_string, remote_id, trashed)
    VALUES
        (60, 2, 60, 24, 2, '/1/2/60/', 'loc-60', 5000);
";

/// Seeds the fixture content into `db`.
pub fn seed(db: &SqliteDatabase) {
    let conn = db.connection().expect("Failed to get connection");
    for batch in [LANGUAGES, SECTIONS, CONTENT_TYPES, CONTENT, FIELDS, TREE] {
        conn.execute_batch(batch).expect("Failed to seed fixture data");
    }
}
