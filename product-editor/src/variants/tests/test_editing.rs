use super::*;
use crate::utils::validation::MAX_SHORT_TEXT_LEN;

// ========================================================================
// 1. 单字段编辑
// ========================================================================

#[test]
fn test_point_edits_touch_one_row() {
    let (mut engine, _) = red_blue_piece_box();
    let blue_piece = key(&[("Color", "Blue")], Some("Piece"));

    engine
        .update_variant_field(&blue_piece, VariantField::CostPrice(45.5))
        .unwrap();
    engine
        .update_variant_field(&blue_piece, VariantField::Price(109.9))
        .unwrap();
    engine
        .update_variant_field(&blue_piece, VariantField::Stock(0))
        .unwrap();

    let v = engine.variant(&blue_piece).unwrap();
    assert_eq!(v.cost_price, 45.5);
    assert_eq!(v.price, 109.9);
    assert_eq!(v.stock, 0);
    let untouched = engine
        .variant(&key(&[("Color", "Red")], Some("Piece")))
        .unwrap();
    assert_eq!(untouched.price, 100.0);
    assert_eq!(untouched.stock, 50);
}

#[test]
fn test_code_is_read_only() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    assert_eq!(
        engine.update_variant_field(&red_piece, VariantField::Code("X".into())),
        Err(VariantError::ReadOnlyField("code"))
    );
    assert_eq!(engine.variant(&red_piece).unwrap().code, "TEE-RED-PIECE");
}

#[test]
fn test_out_of_range_values_rejected() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));

    for bad in [-0.01, f64::NAN, f64::INFINITY, 1_000_000.01] {
        assert!(matches!(
            engine.update_variant_field(&red_piece, VariantField::Price(bad)),
            Err(VariantError::InvalidPrice { field: "price", .. })
        ));
    }
    assert!(matches!(
        engine.update_variant_field(&red_piece, VariantField::CostPrice(-5.0)),
        Err(VariantError::InvalidPrice {
            field: "cost_price",
            ..
        })
    ));
    assert!(matches!(
        engine.update_variant_field(&red_piece, VariantField::Stock(-1)),
        Err(VariantError::InvalidStock { .. })
    ));
    assert_eq!(engine.variant(&red_piece).unwrap().price, 100.0);
    assert_eq!(engine.variant(&red_piece).unwrap().stock, 50);
}

#[test]
fn test_stock_only_on_base_rows() {
    let (mut engine, _) = red_blue_piece_box();
    let red_box = key(&[("Color", "Red")], Some("Box"));
    assert_eq!(
        engine.update_variant_field(&red_box, VariantField::Stock(3)),
        Err(VariantError::StockOnNonBaseUnit(red_box.clone()))
    );
    engine
        .update_variant_field(&red_box, VariantField::Stock(0))
        .unwrap();
}

#[test]
fn test_barcodes_unique_when_set() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    let blue_piece = key(&[("Color", "Blue")], Some("Piece"));

    engine
        .update_variant_field(&red_piece, VariantField::Barcode(" 6901234567892 ".into()))
        .unwrap();
    assert_eq!(engine.variant(&red_piece).unwrap().barcode, "6901234567892");
    assert_eq!(
        engine.update_variant_field(&blue_piece, VariantField::Barcode("6901234567892".into())),
        Err(VariantError::DuplicateBarcode("6901234567892".to_string()))
    );
    // 重复设置同一行 / 清空都允许
    engine
        .update_variant_field(&red_piece, VariantField::Barcode("6901234567892".into()))
        .unwrap();
    engine
        .update_variant_field(&red_piece, VariantField::Barcode(String::new()))
        .unwrap();
    engine
        .update_variant_field(&blue_piece, VariantField::Barcode(String::new()))
        .unwrap();
}

#[test]
fn test_long_barcode_and_value_rejected() {
    let (mut engine, color) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    let long = "9".repeat(MAX_SHORT_TEXT_LEN + 1);

    assert_eq!(
        engine.update_variant_field(&red_piece, VariantField::Barcode(long.clone())),
        Err(VariantError::TextTooLong {
            field: "barcode",
            max: MAX_SHORT_TEXT_LEN
        })
    );
    assert_eq!(
        engine.add_attribute_value(color, &long),
        Err(VariantError::TextTooLong {
            field: "attribute value",
            max: MAX_SHORT_TEXT_LEN
        })
    );
    assert_eq!(engine.variant(&red_piece).unwrap().barcode, "");
    assert_eq!(engine.attribute(color).unwrap().values, vec!["Red", "Blue"]);
    assert_eq!(engine.variants().len(), 4);
}

#[test]
fn test_unknown_variant() {
    let (mut engine, _) = red_blue_piece_box();
    let green = key(&[("Color", "Green")], Some("Piece"));
    assert_eq!(
        engine.update_variant_field(&green, VariantField::Price(1.0)),
        Err(VariantError::VariantNotFound(green.clone()))
    );
    assert_eq!(
        engine.delete_variant(&green),
        Err(VariantError::VariantNotFound(green))
    );
}

// ========================================================================
// 2. 批量价格 / 删除
// ========================================================================

#[test]
fn test_apply_price_to_all_copies_first_row() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    engine
        .update_variant_field(&red_piece, VariantField::Price(88.0))
        .unwrap();

    assert_eq!(engine.apply_price_to_all(), 4);
    assert!(engine.variants().iter().all(|v| v.price == 88.0));
}

#[test]
fn test_apply_price_to_all_on_empty_engine() {
    let mut engine = create_test_engine();
    assert_eq!(engine.apply_price_to_all(), 0);
}

#[test]
fn test_delete_variant_does_not_cascade() {
    let (mut engine, color) = red_blue_piece_box();
    let red_box = key(&[("Color", "Red")], Some("Box"));

    let removed = engine.delete_variant(&red_box).unwrap();
    assert_eq!(removed.key(), red_box);
    assert_eq!(engine.variants().len(), 3);
    assert_eq!(engine.units().len(), 2);
    assert_eq!(engine.attribute(color).unwrap().values, vec!["Red", "Blue"]);
}

// ========================================================================
// 3. 默认值 / 恢复编辑
// ========================================================================

#[test]
fn test_defaults_seed_only_new_rows() {
    let (mut engine, color) = red_blue_piece_box();
    engine
        .set_defaults(VariantDefaults {
            cost_price: 10.0,
            price: 25.0,
            stock: 5,
        })
        .unwrap();
    engine.add_attribute_value(color, "Green").unwrap();

    let red = engine
        .variant(&key(&[("Color", "Red")], Some("Piece")))
        .unwrap();
    assert_eq!(red.price, 100.0);
    let green = engine
        .variant(&key(&[("Color", "Green")], Some("Piece")))
        .unwrap();
    assert_eq!(green.price, 25.0);
    assert_eq!(green.stock, 5);

    assert!(matches!(
        engine.set_defaults(VariantDefaults {
            cost_price: 0.0,
            price: -1.0,
            stock: 0,
        }),
        Err(VariantError::InvalidPrice { .. })
    ));
    assert_eq!(engine.defaults().price, 25.0);
}

#[test]
fn test_resume_from_properties_continues_row_ids() {
    let (engine, _) = red_blue_piece_box();
    let props = engine.to_properties();
    let max_id = props.variants.iter().map(|v| v.row_id).max().unwrap();

    let mut resumed =
        VariantEngine::from_properties(props, "TEE", defaults(), shared::models::Vertical::Fashion);
    let color = resumed.attributes()[0].id;
    resumed.add_attribute_value(color, "Green").unwrap();

    assert_eq!(resumed.variants().len(), 6);
    assert!(resumed.variants()[4..].iter().all(|v| v.row_id > max_id));
    let size = resumed.add_attribute("Size").unwrap();
    assert!(size > color);
    assert_unique(&resumed);
}

#[test]
fn test_resume_with_largest_row_id() {
    let (engine, _) = red_blue_piece_box();
    let mut props = engine.to_properties();
    props.variants[0].row_id = u64::MAX;

    let mut resumed =
        VariantEngine::from_properties(props, "TEE", defaults(), shared::models::Vertical::Fashion);
    let color = resumed.attributes()[0].id;
    resumed.add_attribute_value(color, "Green").unwrap();

    assert_eq!(resumed.variants().len(), 6);
    assert_eq!(resumed.variants()[0].row_id, u64::MAX);
}
