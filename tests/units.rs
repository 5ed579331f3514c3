use injector_catalog::model::format_number;
use injector_catalog::view::units::convert;
use injector_catalog::view::{CapacityUnit, to_cc, to_lb};

#[test]
fn cc_to_lb_rounds_to_two_decimals() {
    assert_eq!(to_lb(550.0), 52.71);
    assert_eq!(to_lb(1000.0), 95.83);
    assert_eq!(to_lb(0.0), 0.0);
}

#[test]
fn lb_to_cc_rounds_to_whole_numbers() {
    assert_eq!(to_cc(52.71), 550.0);
    assert_eq!(to_cc(95.83), 1000.0);
}

#[test]
fn round_trip_is_lossy() {
    let lb = convert(550.5, CapacityUnit::Cc, CapacityUnit::Lb);
    assert_eq!(lb, 52.75);
    assert_eq!(convert(lb, CapacityUnit::Lb, CapacityUnit::Cc), 550.0);
    assert_eq!(convert(550.5, CapacityUnit::Cc, CapacityUnit::Cc), 550.5);
}

#[test]
fn unit_labels_and_flip() {
    assert_eq!(CapacityUnit::Cc.other(), CapacityUnit::Lb);
    assert_eq!(CapacityUnit::Lb.other().label(), "CC");
    assert_eq!(CapacityUnit::Lb.from_source(1000.0), 95.83);
}

#[test]
fn numbers_format_without_trailing_zero() {
    assert_eq!(format_number(550.0), "550");
    assert_eq!(format_number(43.5), "43.5");
    assert_eq!(format_number(52.71), "52.71");
    assert_eq!(format_number(-1.0), "-1");
}
