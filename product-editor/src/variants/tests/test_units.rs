use super::*;

fn unit_id(engine: &VariantEngine, name: &str) -> i64 {
    engine
        .units()
        .iter()
        .find(|u| u.name == name)
        .map(|u| u.id)
        .unwrap()
}

// ========================================================================
// 1. 新增单位: 组合 × 新单位列表, 价格沿用, 库存只在 base
// ========================================================================

#[test]
fn test_adding_carton_yields_six_rows() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    engine
        .update_variant_field(&red_piece, VariantField::Price(120.0))
        .unwrap();
    engine
        .update_variant_field(&red_piece, VariantField::Stock(70))
        .unwrap();
    let red_piece_id = engine.variant(&red_piece).unwrap().row_id;

    engine
        .add_or_update_unit(UnitInput::new("Carton", 144.0))
        .unwrap();

    assert_eq!(engine.variants().len(), 6);
    let red_carton = engine
        .variant(&key(&[("Color", "Red")], Some("Carton")))
        .unwrap();
    assert_eq!(red_carton.price, 120.0);
    assert_eq!(red_carton.stock, 0);
    assert_eq!(red_carton.conversion_to_base, 144.0);
    assert_eq!(red_carton.code, "TEE-RED-CARTON");

    let red = engine.variant(&red_piece).unwrap();
    assert_eq!(red.stock, 70);
    assert_eq!(red.row_id, red_piece_id);

    for v in engine.variants() {
        if v.unit_name.as_deref() == Some("Piece") {
            assert!(v.stock > 0);
        }
    }
    assert_non_base_stock_zero(&engine);
    assert_unique(&engine);
}

#[test]
fn test_first_row_of_combination_wins() {
    let (mut engine, _) = red_blue_piece_box();
    let red_box = key(&[("Color", "Red")], Some("Box"));
    // Box 行改价不会被带到其他单位, Piece 行排在前面
    engine
        .update_variant_field(&red_box, VariantField::Price(999.0))
        .unwrap();

    engine
        .add_or_update_unit(UnitInput::new("Carton", 144.0))
        .unwrap();

    let carton = engine
        .variant(&key(&[("Color", "Red")], Some("Carton")))
        .unwrap();
    assert_eq!(carton.price, 100.0);
    assert_eq!(engine.variant(&red_box).unwrap().price, 100.0);
}

#[test]
fn test_unit_price_applies_to_its_rows() {
    let (mut engine, _) = red_blue_piece_box();
    let box_id = unit_id(&engine, "Box");
    engine
        .add_or_update_unit(UnitInput::new("Box", 12.0).with_price(1150.0).for_unit(box_id))
        .unwrap();

    for v in engine.variants() {
        match v.unit_name.as_deref() {
            Some("Box") => assert_eq!(v.price, 1150.0),
            _ => assert_eq!(v.price, 100.0),
        }
    }
    assert_eq!(engine.variants().len(), 4);
}

#[test]
fn test_barcodes_survive_regeneration() {
    let (mut engine, _) = red_blue_piece_box();
    let blue_box = key(&[("Color", "Blue")], Some("Box"));
    engine
        .update_variant_field(&blue_box, VariantField::Barcode("8801234567893".into()))
        .unwrap();

    engine
        .add_or_update_unit(UnitInput::new("Carton", 144.0))
        .unwrap();

    assert_eq!(engine.variant(&blue_box).unwrap().barcode, "8801234567893");
}

// ========================================================================
// 2. 删除单位
// ========================================================================

#[test]
fn test_deleting_sole_base_unit_rejected() {
    let mut engine = create_test_engine();
    let piece = engine
        .add_or_update_unit(UnitInput::new("Piece", 1.0))
        .unwrap();
    let color = engine.add_attribute("Color").unwrap();
    engine.add_attribute_value(color, "Red").unwrap();
    let before = engine.to_properties();

    assert_eq!(
        engine.delete_unit(piece),
        Err(VariantError::SoleBaseUnit("Piece".to_string()))
    );
    assert_eq!(engine.to_properties(), before);
}

#[test]
fn test_deleting_base_unit_promotes_next() {
    let (mut engine, _) = red_blue_piece_box();
    let piece = unit_id(&engine, "Piece");

    let removed = engine.delete_unit(piece).unwrap();
    assert_eq!(removed.name, "Piece");

    let bases: Vec<_> = engine.units().iter().filter(|u| u.is_base).collect();
    assert_eq!(bases.len(), 1);
    assert_eq!(bases[0].name, "Box");
    assert_eq!(bases[0].conversion_to_base, 1.0);

    assert_eq!(engine.variants().len(), 2);
    for v in engine.variants() {
        assert_eq!(v.unit_name.as_deref(), Some("Box"));
        assert_eq!(v.conversion_to_base, 1.0);
        assert_eq!(v.stock, 50);
    }
}

#[test]
fn test_deleting_non_base_unit() {
    let (mut engine, _) = red_blue_piece_box();
    let box_id = unit_id(&engine, "Box");
    engine.delete_unit(box_id).unwrap();

    assert_eq!(
        keys(&engine),
        vec![
            key(&[("Color", "Red")], Some("Piece")),
            key(&[("Color", "Blue")], Some("Piece")),
        ]
    );
    assert_eq!(engine.delete_unit(box_id), Err(VariantError::UnitNotFound(box_id)));
}

// ========================================================================
// 3. 单位校验
// ========================================================================

#[test]
fn test_invalid_units_leave_state_unchanged() {
    let (mut engine, _) = red_blue_piece_box();
    let before = engine.to_properties();

    assert!(matches!(
        engine.add_or_update_unit(UnitInput::new("Pack", 1.0)),
        Err(VariantError::InvalidConversion { .. })
    ));
    assert!(matches!(
        engine.add_or_update_unit(UnitInput::new("Pack", -6.0)),
        Err(VariantError::InvalidConversion { .. })
    ));
    assert_eq!(
        engine.add_or_update_unit(UnitInput::new("box", 6.0)),
        Err(VariantError::DuplicateUnitName("box".to_string()))
    );
    assert_eq!(
        engine.add_or_update_unit(UnitInput::new("  ", 6.0)),
        Err(VariantError::UnitNameRequired)
    );
    assert!(matches!(
        engine.add_or_update_unit(UnitInput::new("Pack", 6.0).with_price(-1.0)),
        Err(VariantError::InvalidPrice { .. })
    ));
    assert_eq!(engine.to_properties(), before);
}

#[test]
fn test_moving_base_rescales_conversions() {
    let (mut engine, _) = red_blue_piece_box();
    let box_id = unit_id(&engine, "Box");
    engine
        .add_or_update_unit(UnitInput::new("Box", 12.0).as_base().for_unit(box_id))
        .unwrap();

    let base = engine.base_unit().unwrap();
    assert_eq!(base.name, "Box");
    assert_eq!(base.conversion_to_base, 1.0);
    let piece = engine.units().iter().find(|u| u.name == "Piece").unwrap();
    assert!(!piece.is_base);
    assert!((piece.conversion_to_base - 1.0 / 12.0).abs() < 1e-12);

    assert_eq!(engine.variants().len(), 4);
    assert_non_base_stock_zero(&engine);
    let red_box = engine
        .variant(&key(&[("Color", "Red")], Some("Box")))
        .unwrap();
    assert!(red_box.is_base_unit());
}

#[test]
fn test_stock_follows_base_after_base_moves() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    let red_box = key(&[("Color", "Red")], Some("Box"));
    engine
        .update_variant_field(&red_piece, VariantField::Stock(70))
        .unwrap();
    let box_id = unit_id(&engine, "Box");
    engine
        .add_or_update_unit(UnitInput::new("Box", 12.0).as_base().for_unit(box_id))
        .unwrap();
    assert_eq!(engine.variant(&red_box).unwrap().stock, 70);
    assert_eq!(engine.variant(&red_piece).unwrap().stock, 0);

    // Piece 行仍排在前面, 库存取 base 行
    engine
        .add_or_update_unit(UnitInput::new("Carton", 10.0))
        .unwrap();

    assert_eq!(engine.variants().len(), 6);
    assert_eq!(engine.variant(&red_box).unwrap().stock, 70);
    let blue_box = key(&[("Color", "Blue")], Some("Box"));
    assert_eq!(engine.variant(&blue_box).unwrap().stock, 50);
    assert_non_base_stock_zero(&engine);

    engine.rebuild();
    assert_eq!(engine.variant(&red_box).unwrap().stock, 70);
}

#[test]
fn test_renaming_unit_keeps_barcodes_and_row_ids() {
    let (mut engine, _) = red_blue_piece_box();
    let red_piece = key(&[("Color", "Red")], Some("Piece"));
    engine
        .update_variant_field(&red_piece, VariantField::Barcode("6901234567892".into()))
        .unwrap();
    let row_id = engine.variant(&red_piece).unwrap().row_id;
    let piece = unit_id(&engine, "Piece");

    engine
        .add_or_update_unit(UnitInput::new("Pc", 1.0).for_unit(piece))
        .unwrap();

    assert!(engine.variant(&red_piece).is_none());
    let red_pc = engine
        .variant(&key(&[("Color", "Red")], Some("Pc")))
        .unwrap();
    assert_eq!(red_pc.barcode, "6901234567892");
    assert_eq!(red_pc.row_id, row_id);
    assert_eq!(red_pc.stock, 50);
    assert_eq!(red_pc.code, "TEE-RED-PC");
    assert_eq!(engine.variants().len(), 4);
    assert_unique(&engine);
}

// ========================================================================
// 4. 只有单位, 没有属性
// ========================================================================

#[test]
fn test_unit_only_product() {
    let mut engine = create_test_engine();
    engine
        .add_or_update_unit(UnitInput::new("Piece", 1.0))
        .unwrap();
    engine
        .add_or_update_unit(UnitInput::new("Box", 12.0))
        .unwrap();

    assert_eq!(
        keys(&engine),
        vec![key(&[], Some("Piece")), key(&[], Some("Box"))]
    );
    assert_eq!(engine.variants()[0].code, "TEE-PIECE");
    assert_eq!(engine.variants()[0].stock, 50);
    assert_eq!(engine.variants()[1].stock, 0);
}
