use querytree::expression::{type_check_against, QueryExpression};
use querytree::schema::SchemaDocument;
use querytree::types::QueryType;
use std::fs;
use tempfile::tempdir;

const LIBRARY_SCHEMA: &str = r#"{
  "entity_types": [
    { "name": "Item", "properties": [
      { "name": "Title", "type": "String" }
    ] },
    { "name": "Book", "base": "Item", "properties": [
      { "name": "Pages", "type": "Int32" }
    ] },
    { "name": "Shelf", "properties": [
      { "name": "Items", "type": "Collection(Item)" }
    ] }
  ]
}"#;

#[test]
fn test_load_schema_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, LIBRARY_SCHEMA).unwrap();

    let registry = SchemaDocument::from_path(&path)
        .unwrap()
        .into_registry()
        .unwrap();
    let book = registry.get("Book").unwrap();
    let shelf = registry.get("Shelf").unwrap();

    // Shelf.Items of type Book
    let items = QueryExpression::property(QueryExpression::root("Shelf", shelf).unwrap(), "Items")
        .unwrap();
    let books = QueryExpression::of_type(items, book.clone()).unwrap();
    assert_eq!(books.to_string(), "(Shelf.Items of type Book)");
    assert_eq!(books.result_type(), &QueryType::collection_of(book));
    assert!(type_check_against(&books, &registry).is_ok());

    // A frozen registry refuses new definitions
    assert!(registry.define_entity("Magazine", Some("Item"), vec![]).is_err());
}

#[test]
fn test_missing_schema_file() {
    let dir = tempdir().unwrap();
    let err = SchemaDocument::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read schema file"));
}

#[test]
fn test_document_round_trips_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("demo.json");

    let demo = SchemaDocument::demo().unwrap();
    fs::write(&path, serde_json::to_string_pretty(&demo).unwrap()).unwrap();
    assert_eq!(SchemaDocument::from_path(&path).unwrap(), demo);
}

#[test]
fn test_trees_from_different_schemas_do_not_mix() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, LIBRARY_SCHEMA).unwrap();

    let library = SchemaDocument::from_path(&path)
        .unwrap()
        .into_registry()
        .unwrap();
    let demo = SchemaDocument::demo().unwrap().into_registry().unwrap();

    let expr = QueryExpression::parameter("b", library.get("Book").unwrap()).unwrap();
    assert!(type_check_against(&expr, &library).is_ok());
    assert!(type_check_against(&expr, &demo).is_err());
}
