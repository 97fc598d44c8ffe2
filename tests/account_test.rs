// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account public API and serde contract tests.

use billing_ledger_rs::{
    CustomerAccount, CustomerId, Price, Transaction, TransactionKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// === Helper Functions ===

fn make_charge(customer: &str, amount: Decimal, date: NaiveDate) -> Transaction {
    Transaction {
        kind: TransactionKind::Charge,
        value: Price::gbp(amount),
        customer_id: CustomerId::from(customer),
        date,
    }
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

// === Basic Account Tests ===

#[test]
fn open_account_starts_at_opening_balance() {
    let account = CustomerAccount::open(CustomerId::from("c-1"));
    assert_eq!(
        account.credit_account.balance.amount,
        CustomerAccount::OPENING_BALANCE
    );
    assert!(account.credit_account.statements.is_empty());
}

#[test]
fn apply_subtracts_and_appends() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));

    assert_eq!(account.credit_account.balance.amount, dec!(80.00));
    assert_eq!(account.credit_account.statements.len(), 1);
}

#[test]
fn sequential_applies_accumulate() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));
    account.apply(&make_charge("c-1", dec!(30.00), march(6)));
    account.apply(&make_charge("c-1", dec!(25.50), march(7)));

    assert_eq!(account.credit_account.balance.amount, dec!(24.50));
    assert_eq!(account.credit_account.statements.len(), 3);
}

#[test]
fn statements_snapshot_the_running_balance() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));
    account.apply(&make_charge("c-1", dec!(30.00), march(6)));

    let statements = &account.credit_account.statements;
    assert_eq!(statements[0].balance.amount, dec!(80.00));
    assert_eq!(statements[0].date, march(5));
    assert_eq!(statements[1].balance.amount, dec!(50.00));
    assert_eq!(statements[1].date, march(6));
}

#[test]
fn each_statement_carries_two_records() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));

    let records = &account.credit_account.statements[0].transactions;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, TransactionKind::Charge);
    assert_eq!(records[1].kind, TransactionKind::Payment);
    assert_eq!(records[0].value.amount, dec!(20.00));
    assert_eq!(records[1].value.amount, dec!(20.00));
}

// === Edge Cases ===

#[test]
fn charge_exceeding_balance_goes_negative() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(115.00), march(5)));
    assert_eq!(account.credit_account.balance.amount, dec!(-15.00));
}

#[test]
fn small_decimal_precision() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(0.0001), march(5)));
    account.apply(&make_charge("c-1", dec!(0.0002), march(5)));
    assert_eq!(account.credit_account.balance.amount, dec!(99.9997));
}

#[test]
fn large_amounts() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    let large = dec!(999999999999.9999);
    account.apply(&make_charge("c-1", large, march(5)));
    assert_eq!(
        account.credit_account.balance.amount,
        dec!(100) - large
    );
}

#[test]
fn empty_customer_id_is_accepted() {
    let mut account = CustomerAccount::open(CustomerId::from(""));
    account.apply(&make_charge("", dec!(20.00), march(5)));
    assert_eq!(account.credit_account.balance.amount, dec!(80.00));
}

// === Serde Contract Tests ===

#[test]
fn document_serializes_with_camel_case_fields() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));

    let doc: serde_json::Value = serde_json::to_value(&account).unwrap();
    assert_eq!(doc["customerId"], "c-1");
    assert!(doc["creditAccount"].is_object());
    assert_eq!(doc["creditAccount"]["balance"]["amount"], "80.00");
    assert_eq!(doc["creditAccount"]["balance"]["currencyCode"], "GBP");
    assert!(doc["creditAccount"]["statements"].is_array());
}

#[test]
fn dates_serialize_as_iso_days() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));

    let doc: serde_json::Value = serde_json::to_value(&account).unwrap();
    assert_eq!(doc["creditAccount"]["statements"][0]["date"], "2024-03-05");
}

#[test]
fn record_kind_serializes_under_type_by_variant_name() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));

    let doc: serde_json::Value = serde_json::to_value(&account).unwrap();
    let records = &doc["creditAccount"]["statements"][0]["transactions"];
    assert_eq!(records[0]["type"], "Charge");
    assert_eq!(records[1]["type"], "Payment");
}

#[test]
fn document_round_trips() {
    let mut account = CustomerAccount::open(CustomerId::from("c-1"));
    account.apply(&make_charge("c-1", dec!(20.00), march(5)));
    account.apply(&make_charge("c-1", dec!(130.00), march(6)));

    let json = serde_json::to_string(&account).unwrap();
    let parsed: CustomerAccount = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, account);
}

#[test]
fn pascal_case_document_deserializes() {
    let json = r#"{
        "CustomerId": "c-legacy",
        "CreditAccount": {
            "Balance": {"Amount": "70.00", "CurrencyCode": "GBP"},
            "Statements": [
                {
                    "Balance": {"Amount": "70.00", "CurrencyCode": "GBP"},
                    "Date": "2023-11-20",
                    "Transactions": [
                        {"Type": "Charge", "Value": {"Amount": "30.00", "CurrencyCode": "GBP"}},
                        {"Type": "Payment", "Value": {"Amount": "30.00", "CurrencyCode": "GBP"}}
                    ]
                }
            ]
        }
    }"#;

    let account: CustomerAccount = serde_json::from_str(json).unwrap();
    assert_eq!(account.customer_id.as_str(), "c-legacy");
    assert_eq!(account.credit_account.balance.amount, dec!(70.00));
    assert_eq!(account.credit_account.statements.len(), 1);
    assert_eq!(
        account.credit_account.statements[0].transactions[0].kind,
        TransactionKind::Charge
    );
}

#[test]
fn default_document_serializes_empty() {
    let doc: serde_json::Value = serde_json::to_value(CustomerAccount::default()).unwrap();
    assert_eq!(doc["customerId"], "");
    assert_eq!(doc["creditAccount"]["balance"]["amount"], "0");
    assert_eq!(doc["creditAccount"]["statements"], serde_json::json!([]));
}
