use pendler::shared::geo::{Coordinate, decode_flat_pairs};

#[test]
fn decode_swaps_lon_lat() {
    let points = decode_flat_pairs(&[12.5, 55.7, 12.51, 55.71]);
    assert_eq!(
        points,
        vec![Coordinate::from((55.7, 12.5)), Coordinate::from((55.71, 12.51))]
    );
}

#[test]
fn decode_empty() {
    assert!(decode_flat_pairs(&[]).is_empty());
}

#[test]
fn parse_lat_lon() {
    let coordinate: Coordinate = "55.6761, 12.5683".parse().unwrap();
    assert_eq!(coordinate, Coordinate::from((55.6761, 12.5683)));
}

#[test]
fn parse_missing_comma() {
    assert!("55.6761".parse::<Coordinate>().is_err());
}

#[test]
fn parse_bad_number() {
    assert!("55.6761,abc".parse::<Coordinate>().is_err());
}
