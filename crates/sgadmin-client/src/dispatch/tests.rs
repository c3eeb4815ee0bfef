//! Unit tests for chunk planning and sequential dispatch.

use std::num::NonZeroUsize;
use std::time::Duration;

use mockall::Sequence;
use rstest::{fixture, rstest};
use url::Url;

use super::*;
use crate::tests::support::{ScriptedTransport, ids, timeout_error};
use crate::transport::MockTransport;

const TIMEOUT: Duration = Duration::from_secs(30);

fn chunk(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).expect("non-zero chunk size")
}

#[fixture]
fn endpoint() -> Url {
    Url::parse("https://licences.example.com/api/?action=grantDocumentAccess")
        .expect("valid url")
}

fn dispatcher(transport: &ScriptedTransport, size: usize) -> Dispatcher<&ScriptedTransport> {
    Dispatcher::new(transport, chunk(size), TIMEOUT)
}

#[rstest]
#[case(100, 1)]
#[case(101, 2)]
#[case(250, 3)]
#[case(300, 3)]
fn plan_counts_requests_per_list(#[case] count: u32, #[case] expected: usize) {
    let params = ParameterSet::new().with_ids("custid", &ids(1..=count));
    let plan = ChunkPlan::build(&params, chunk(100));
    assert_eq!(plan.request_count(), expected);
    assert_eq!(plan.is_single_request(), expected == 1);
}

#[test]
fn plan_moves_oversized_lists_out_of_the_base() {
    let params = ParameterSet::new()
        .with("mode", "full")
        .with_ids("custid", &ids(1..=5))
        .with_ids("docid", &ids(1..=2));
    let plan = ChunkPlan::build(&params, chunk(2));

    assert_eq!(plan.base().get("custid"), None);
    assert_eq!(plan.base().get("docid"), Some("1,2"));
    assert_eq!(plan.base().get("mode"), Some("full"));
    let chunked = plan.chunked();
    assert_eq!(chunked.len(), 1);
    assert_eq!(chunked.first().map(ChunkedParameter::name), Some("custid"));
    assert_eq!(
        chunked.first().map(ChunkedParameter::batches),
        Some(&[String::from("1,2"), String::from("3,4"), String::from("5")][..])
    );
}

#[test]
fn plan_orders_two_lists_with_customers_outermost() {
    let params = ParameterSet::new()
        .with_ids("docid", &ids(1..=3))
        .with_ids("custid", &ids(10..=13));
    let plan = ChunkPlan::build(&params, chunk(2));

    let pairs: Vec<(String, String)> = plan
        .requests()
        .map(|request| {
            (
                request.get("custid").unwrap_or_default().to_owned(),
                request.get("docid").unwrap_or_default().to_owned(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            (String::from("10,11"), String::from("1,2")),
            (String::from("10,11"), String::from("3")),
            (String::from("12,13"), String::from("1,2")),
            (String::from("12,13"), String::from("3")),
        ]
    );
    assert_eq!(plan.request_count(), 4);
}

#[rstest]
fn single_request_response_is_returned_unmodified(endpoint: Url) {
    let body = "Failed\r\n\r\nCustomer 7 does not exist\n";
    let transport = ScriptedTransport::new().respond(body);
    let params = ParameterSet::new().with_ids("custid", &["7"]);

    let response = dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    assert_eq!(response.body(), body);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests.first().and_then(|r| r.field("custid")), Some("7"));
}

#[rstest]
fn exact_threshold_is_not_split(endpoint: Url) {
    let transport = ScriptedTransport::new();
    let params = ParameterSet::new().with_ids("custid", &ids(1..=100));

    dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    assert_eq!(transport.requests().len(), 1);
}

#[rstest]
fn oversized_list_is_sent_in_ordered_batches(endpoint: Url) {
    let transport = ScriptedTransport::new()
        .respond("OK\nfirst")
        .respond("OK\nsecond")
        .respond("OK\nthird");
    let params = ParameterSet::new()
        .with_ids("custid", &ids(1..=250))
        .with_ids("docid", &["17"]);

    let response = dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    assert_eq!(response.body(), "OK\nthird");
    let requests = transport.requests();
    let sizes: Vec<usize> = requests.iter().map(|r| r.ids("custid").len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    let sent: Vec<String> = requests.iter().flat_map(|r| r.ids("custid")).collect();
    assert_eq!(sent, ids(1..=250));
    assert!(requests.iter().all(|r| r.field("docid") == Some("17")));
    assert!(requests.iter().all(|r| r.timeout == TIMEOUT));
}

#[rstest]
fn two_oversized_lists_form_a_cross_product(endpoint: Url) {
    let transport = ScriptedTransport::new();
    let params = ParameterSet::new()
        .with_ids("custid", &ids(1..=250))
        .with_ids("docid", &ids(1..=150));

    dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    let requests = transport.requests();
    assert_eq!(requests.len(), 6);
    let shape: Vec<(usize, usize)> = requests
        .iter()
        .map(|r| (r.ids("custid").len(), r.ids("docid").len()))
        .collect();
    assert_eq!(
        shape,
        vec![(100, 100), (100, 50), (100, 100), (100, 50), (50, 100), (50, 50)]
    );
}

#[rstest]
fn first_failing_chunk_stops_the_sequence(endpoint: Url) {
    let transport = ScriptedTransport::new()
        .respond("OK")
        .respond("Failed\nCustomer 150 does not exist")
        .respond("OK");
    let params = ParameterSet::new().with_ids("custid", &ids(1..=250));

    let response = dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    assert_eq!(response.status(), "Failed");
    assert_eq!(response.body(), "Failed\nCustomer 150 does not exist");
    assert_eq!(transport.requests().len(), 2);
}

#[rstest]
fn transport_error_aborts_remaining_chunks(endpoint: Url) {
    let transport = ScriptedTransport::new()
        .respond("OK")
        .fail(timeout_error());
    let params = ParameterSet::new().with_ids("custid", &ids(1..=250));

    let error = dispatcher(&transport, 100)
        .dispatch(&endpoint, &params)
        .expect_err("transport failure propagates");

    assert!(matches!(error, TransportError::Timeout { .. }));
    assert_eq!(transport.requests().len(), 2);
}

#[rstest]
fn mocked_transport_sees_each_batch_in_order(endpoint: Url) {
    let mut transport = MockTransport::new();
    let mut sequence = Sequence::new();
    for expected in ["1,2", "3,4", "5"] {
        transport
            .expect_post_form()
            .withf(move |_, fields, _| {
                fields
                    .iter()
                    .any(|(name, value)| name == "custid" && value == expected)
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _, _| Ok(String::from("OK\n")));
    }
    let params = ParameterSet::new().with_ids("custid", &ids(1..=5));

    let response = Dispatcher::new(transport, chunk(2), TIMEOUT)
        .dispatch(&endpoint, &params)
        .expect("dispatch succeeds");

    assert!(response.is_success());
}

#[rstest]
fn set_timeout_applies_to_later_requests(endpoint: Url) {
    let mut transport = MockTransport::new();
    transport
        .expect_post_form()
        .withf(|_, _, timeout| *timeout == Duration::from_secs(5))
        .times(1)
        .returning(|_, _, _| Ok(String::from("OK")));
    let mut subject = Dispatcher::new(transport, chunk(100), TIMEOUT);
    subject.set_timeout(Duration::from_secs(5));

    subject
        .dispatch(&endpoint, &ParameterSet::new())
        .expect("dispatch succeeds");
    assert_eq!(subject.timeout(), Duration::from_secs(5));
}
