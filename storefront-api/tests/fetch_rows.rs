use serde_json::json;
use storefront_api::model::decode_rows;
use storefront_api::query::{FilterState, FilterUpdate, PageWindow, SortState, TableQuery};
use storefront_api::{JsonFetcher, RestClient, StaticFetcher};

#[tokio::test]
async fn test_table_query_round_trip_through_fetcher() {
    let client = RestClient::builder()
        .base_url("http://localhost:3001")
        .build()
        .unwrap();
    let base = client.endpoint("api/rest/products").unwrap();

    let fetcher = StaticFetcher::new().route(
        "/api/rest/products",
        json!([{"id": "p1", "title": "Shoe", "price": 40}]),
    );

    let query = TableQuery {
        sort: SortState::desc("price"),
        window: PageWindow::first(20).unwrap().next(),
        filters: FilterState::default().merged(&FilterUpdate::new().title("shoe").status("1")),
    };

    let body = fetcher.fetch_json(&query.to_url(&base)).await.unwrap();
    let rows = decode_rows(body).unwrap();
    assert_eq!(rows.len(), 1);

    let requested = &fetcher.requests()[0];
    assert_eq!(
        requested.query(),
        Some("_sort=price&_order=desc&_start=20&_end=40&title_like=shoe&status=1")
    );
}
