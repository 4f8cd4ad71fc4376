use std::{cell::Cell, rc::Rc};

use weft::{Binder, Binding, Object, Value};
use weft_dom::{Document, ElementEvent};

#[test]
fn text_inputs_propagate_back() {
    let doc = Document::new();
    let field = doc.create_element("input");
    doc.root().append(&field);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    let runs = Rc::new(Cell::new(0));
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);
    binder.watch(&person, "firstName", {
        let runs = runs.clone();
        move |_, _| runs.set(runs.get() + 1)
    });

    field.set_value("Grace");
    field.dispatch(ElementEvent::Input);

    assert_eq!(person.get("firstName"), Value::from("Grace"));
    assert_eq!(runs.get(), 1);
}

#[test]
fn change_events_also_propagate() {
    let doc = Document::new();
    let field = doc.create_element("textarea");
    doc.root().append(&field);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("bio", "");
    binder.bind(&person, "bio", vec![Binding::new(&field, ["value"])]);

    field.set_value("polymath");
    field.dispatch(ElementEvent::Change);
    assert_eq!(person.get("bio"), Value::from("polymath"));
}

#[test]
fn checkboxes_deliver_booleans() {
    let doc = Document::new();
    let cb = doc.create_element("input");
    cb.set_attr("type", "checkbox");
    doc.root().append(&cb);

    let binder = Binder::with_document(doc);
    let prefs = Object::new().with("subscribed", false);
    binder.bind(&prefs, "subscribed", vec![Binding::new(&cb, ["checked"])]);
    assert_eq!(cb.attr("checked").as_deref(), Some("false"));

    cb.set_checked(true);
    cb.dispatch(ElementEvent::Change);
    assert_eq!(prefs.get("subscribed"), Value::Bool(true));
}

#[test]
fn editable_regions_deliver_their_text() {
    let doc = Document::new();
    let region = doc.create_element("div");
    region.set_attr("contenteditable", "");
    doc.root().append(&region);

    let binder = Binder::with_document(doc);
    let note = Object::new().with("body", "draft");
    binder.bind(&note, "body", vec![Binding::text(&region)]);
    assert_eq!(region.text(), "draft");

    region.set_text("edited");
    region.dispatch(ElementEvent::Input);
    assert_eq!(note.get("body"), Value::from("edited"));
}

#[test]
fn other_elements_stay_one_way() {
    let doc = Document::new();
    let div = doc.create_element("div");
    doc.root().append(&div);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::text(&div)]);

    div.set_text("Grace");
    div.dispatch(ElementEvent::Input);
    div.dispatch(ElementEvent::Change);
    assert_eq!(person.get("firstName"), Value::from("Ada"));
}

#[test]
fn wiring_happens_once_per_element() {
    let doc = Document::new();
    let field = doc.create_element("input");
    doc.root().append(&field);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["title"])]);

    // one wiring: one listener per trigger event, despite two binds
    assert_eq!(field.listener_count(ElementEvent::Input), 1);
    assert_eq!(field.listener_count(ElementEvent::Change), 1);

    let runs = Rc::new(Cell::new(0));
    binder.watch(&person, "firstName", {
        let runs = runs.clone();
        move |_, _| runs.set(runs.get() + 1)
    });

    field.set_value("Grace");
    field.dispatch(ElementEvent::Input);
    assert_eq!(runs.get(), 1);
}

#[test]
fn reverse_writes_sync_every_other_view() {
    let doc = Document::new();
    let field = doc.create_element("input");
    let mirror = doc.create_element("span");
    doc.root().append(&field);
    doc.root().append(&mirror);

    let binder = Binder::with_document(doc);
    let person = Object::new().with("firstName", "Ada");
    binder.bind(&person, "firstName", vec![Binding::new(&field, ["value"])]);
    binder.bind(&person, "firstName", vec![Binding::text(&mirror)]);

    field.set_value("Grace");
    field.dispatch(ElementEvent::Input);

    assert_eq!(mirror.text(), "Grace");
    assert_eq!(field.value(), "Grace");
}
