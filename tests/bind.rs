use std::{cell::Cell, rc::Rc};

use weft::{Binder, Binding, Object, Value};
use weft_dom::Document;

#[test]
fn initial_sync_reflects_existing_state() {
    let doc = Document::new();
    let field = doc.create_element("input");
    doc.root().append(&field);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);

    // no write happened, yet the view reflects the current value
    assert_eq!(field.value(), "Ada");
}

#[test]
fn writes_propagate_to_every_bound_attribute() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(
        &person,
        "firstName",
        vec![Binding::new(&el, ["title", "data-label"])],
    );

    person.set("firstName", "Grace");
    assert_eq!(el.attr("title").as_deref(), Some("Grace"));
    assert_eq!(el.attr("data-label").as_deref(), Some("Grace"));
}

#[test]
fn bound_reads_delegate_to_the_model_entry() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::text(&el)]);

    person.set("firstName", "Grace");
    assert_eq!(person.get("firstName"), Value::from("Grace"));
}

#[test]
fn rebinding_the_same_element_merges_attribute_sets() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::new(&el, ["title"])]);
    binder.bind(&person, "firstName", vec![Binding::new(&el, ["data-label"])]);

    assert_eq!(binder.binding_count(&person, "firstName"), 1);
    person.set("firstName", "Grace");
    assert_eq!(el.attr("title").as_deref(), Some("Grace"));
    assert_eq!(el.attr("data-label").as_deref(), Some("Grace"));
}

#[test]
fn identical_binds_are_idempotent() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::new(&el, ["title"])]);
    binder.bind(&person, "firstName", vec![Binding::new(&el, ["title"])]);

    assert_eq!(binder.binding_count(&person, "firstName"), 1);
    assert_eq!(binder.watcher_count(&person, "firstName"), 0);
}

#[test]
fn multiple_elements_mirror_one_property() {
    let doc = Document::new();
    let heading = doc.create_element("h1");
    let field = doc.create_element("input");
    doc.root().append(&heading);
    doc.root().append(&field);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::text(&heading)]);
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);

    person.set("firstName", "Grace");
    assert_eq!(heading.text(), "Grace");
    assert_eq!(field.value(), "Grace");
}

#[test]
fn dataset_attributes_route_through_the_dataset_interface() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("role", "admin");
    binder.bind(&person, "role", vec![Binding::new(&el, ["data-user-role"])]);

    assert_eq!(el.dataset_get("userRole").as_deref(), Some("admin"));
    assert_eq!(el.attr("data-user-role").as_deref(), Some("admin"));
}

#[test]
fn null_coerces_to_the_empty_string() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("note", "something");
    binder.bind(&person, "note", vec![Binding::text(&el)]);
    assert_eq!(el.text(), "something");

    person.set("note", Value::Null);
    assert_eq!(el.text(), "");
}

#[test]
fn numbers_and_objects_stringify() {
    let doc = Document::new();
    let age = doc.create_element("span");
    let card = doc.create_element("pre");
    doc.root().append(&age);
    doc.root().append(&card);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("age", 36);
    let profile = Object::new();
    profile.set("person", Object::new().with("firstName", "Ada"));

    binder.bind(&person, "age", vec![Binding::text(&age)]);
    binder.bind(&profile, "person", vec![Binding::text(&card)]);

    assert_eq!(age.text(), "36");
    assert_eq!(card.text(), "{\n  \"firstName\": \"Ada\"\n}");
}

#[test]
fn booleans_pass_through() {
    let doc = Document::new();
    let el = doc.create_element("span");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let flags = Object::new().with("enabled", true);
    binder.bind(&flags, "enabled", vec![Binding::text(&el)]);
    assert_eq!(el.text(), "true");
}

#[test]
fn a_second_accessor_install_is_ignored() {
    let doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    doc.root().append(&a);
    doc.root().append(&b);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::text(&a)]);
    // second bind re-installs; the merge still proceeds
    binder.bind(&person, "firstName", vec![Binding::text(&b)]);

    person.set("firstName", "Grace");
    assert_eq!(a.text(), "Grace");
    assert_eq!(b.text(), "Grace");
    assert_eq!(person.get("firstName"), Value::from("Grace"));
}

#[test]
fn equal_value_writes_leave_the_view_alone() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    let runs = Rc::new(Cell::new(0));
    binder.bind_with(
        &person,
        "firstName",
        vec![Binding::text(&el)],
        vec![Rc::new({
            let runs = runs.clone();
            move |_: &Value, _: &Value| runs.set(runs.get() + 1)
        })],
    );

    person.set("firstName", "Ada");
    assert_eq!(runs.get(), 0);
    assert_eq!(el.text(), "Ada");
}

#[test]
fn a_dropped_binder_reverts_properties_to_plain_storage() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.root().append(&el);

    let person = Object::new().with("firstName", "Ada");
    {
        let binder = Binder::with_document(doc);
        binder.bind(&person, "firstName", vec![Binding::text(&el)]);
        person.set("firstName", "Grace");
        assert_eq!(person.get("firstName"), Value::from("Grace"));
    }

    person.set("firstName", "Katherine");
    assert_eq!(person.get("firstName"), Value::from("Katherine"));
}
