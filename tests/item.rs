use aws_sdk_dynamodb::types::AttributeValue;
use dynamodb_codec::{
    codec::{self, Codec, error::ReadError},
    error::Error,
    read, record_codec, union_codec,
    wire::WireValue,
    write,
};
use rstest::rstest;
use std::collections;

#[derive(Clone, Debug, PartialEq)]
struct Person {
    name: String,
    item: collections::HashSet<i32>,
}

record_codec! {
    PersonCodec for Person {
        name: codec::string(),
        item: codec::set::<i32>(),
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Payment {
    Card {
        last4: String,
        expiry: Option<String>,
    },
    Transfer {
        iban: String,
    },
    Cash,
}

union_codec! {
    PaymentCodec for Payment {
        Card {
            last4 as "lastFour": codec::string(),
            expiry: codec::option(codec::string()),
        },
        Transfer { iban: codec::string() },
        Cash,
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Order {
    id: uuid::Uuid,
    total: rust_decimal::Decimal,
    payments: Vec<Payment>,
}

record_codec! {
    OrderCodec for Order {
        id: codec::uuid(),
        total: codec::number::<rust_decimal::Decimal>(),
        payments: codec::list(PaymentCodec),
    }
}

fn person() -> Person {
    Person {
        name: "bob".to_string(),
        item: collections::HashSet::from([1, 2, 3]),
    }
}

fn text(value: &str) -> WireValue {
    WireValue::Str(value.to_string())
}

#[test]
fn test_person_wire_shape() {
    let expected = WireValue::Map(collections::HashMap::from([
        ("name".to_string(), text("bob")),
        (
            "item".to_string(),
            WireValue::NumberSet(collections::BTreeSet::from([
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
            ])),
        ),
    ]));
    assert_eq!(PersonCodec.write(&person()), expected);
    assert_eq!(PersonCodec.read(&expected), Ok(person()));
}

#[test]
fn test_person_item_round_trip() {
    let item = write::encode_item(&PersonCodec, &person()).unwrap();
    assert_eq!(item["name"], AttributeValue::S("bob".to_string()));
    match &item["item"] {
        AttributeValue::Ns(numbers) => {
            let mut numbers = numbers.clone();
            numbers.sort();
            assert_eq!(numbers, vec!["1", "2", "3"]);
        }
        other => panic!("unexpected attribute {other:?}"),
    }
    let decoded = read::decode_item(&PersonCodec, item).unwrap();
    assert_eq!(decoded, person());
}

#[test]
fn test_person_empty_set_is_absent() {
    let nobody = Person {
        name: "nobody".to_string(),
        item: collections::HashSet::new(),
    };
    let item = write::encode_item(&PersonCodec, &nobody).unwrap();
    assert!(!item.contains_key("item"));
    let decoded = read::decode_item(&PersonCodec, item).unwrap();
    assert_eq!(decoded, nobody);
}

#[test]
fn test_person_read_accumulates_failures() {
    let value = WireValue::Map(collections::HashMap::from([(
        "item".to_string(),
        text("not a set"),
    )]));
    let Err(ReadError::InvalidProperties(failures)) = PersonCodec.read(&value) else {
        panic!("expected invalid properties");
    };
    let mut names: Vec<_> = failures.iter().map(|(name, _)| name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["item", "name"]);
}

#[rstest]
#[case::card(Payment::Card {
    last4: "4242".to_string(),
    expiry: Some("12/30".to_string()),
})]
#[case::card_without_expiry(Payment::Card {
    last4: "0000".to_string(),
    expiry: None,
})]
#[case::transfer(Payment::Transfer {
    iban: "DE00".to_string(),
})]
#[case::cash(Payment::Cash)]
fn test_union_round_trip(#[case] payment: Payment) {
    assert_eq!(PaymentCodec.read(&PaymentCodec.write(&payment)), Ok(payment));
}

#[test]
fn test_union_wire_shape() {
    let card = Payment::Card {
        last4: "4242".to_string(),
        expiry: None,
    };
    let expected = WireValue::Map(collections::HashMap::from([(
        "Card".to_string(),
        WireValue::Map(collections::HashMap::from([(
            "lastFour".to_string(),
            text("4242"),
        )])),
    )]));
    assert_eq!(PaymentCodec.write(&card), expected);
    assert_eq!(PaymentCodec.write(&Payment::Cash), text("Cash"));
}

#[test]
fn test_nested_order_item_round_trip() {
    let order = Order {
        id: uuid::Uuid::new_v4(),
        total: "19.99".parse().unwrap(),
        payments: vec![
            Payment::Cash,
            Payment::Transfer {
                iban: "DE00".to_string(),
            },
        ],
    };
    let item = write::encode_item(&OrderCodec, &order).unwrap();
    assert_eq!(item["total"], AttributeValue::N("19.99".to_string()));
    assert_eq!(item["id"], AttributeValue::S(order.id.to_string()));
    let decoded = read::decode_item(&OrderCodec, item).unwrap();
    assert_eq!(decoded, order);
}

#[test]
fn test_decode_item_reports_read_error() {
    let item = collections::HashMap::from([
        ("name".to_string(), AttributeValue::N("1".to_string())),
        ("item".to_string(), AttributeValue::Null(true)),
    ]);
    let actual = read::decode_item(&PersonCodec, item);
    assert!(matches!(
        actual,
        Err(Error::Read(ReadError::InvalidProperties(ref failures))) if failures.len() == 1
    ));
}
