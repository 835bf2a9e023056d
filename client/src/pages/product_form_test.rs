use super::*;

#[test]
fn mode_labels() {
    let update = ProductFormMode::Update("p-1".to_owned());
    assert_eq!(ProductFormMode::Create.title(), "Create Product");
    assert_eq!(update.title(), "Update Product");
    assert_eq!(ProductFormMode::Create.submit_label(true), "Creating...");
    assert_eq!(update.submit_label(false), "Update Product");
    assert_eq!(update.submit_label(true), "Updating...");
}
