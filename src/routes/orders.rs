use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, FieldError, Result},
    models::{
        AdminOrder, AdminOrderListResponse, CheckoutItem, CheckoutRequest, CheckoutResponse,
        CustomerInfo, OrderListResponse, OrderStatus, OrderWithItems, SingleOrderResponse,
        StatusUpdateResponse, UpdateStatusRequest, User, UserRole,
    },
    queries::{order_queries, user_queries},
    services::whatsapp_service::{self, NotificationKind},
};

pub async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    validate_checkout(&payload)?;

    // The client never supplies a total; the sum of the submitted lines is
    // the authoritative figure.
    let total = compute_order_total(&payload.items)?;

    let (order, items) =
        order_queries::create_order_with_items(&state.db, user.id, total, &payload).await?;

    whatsapp_service::send_order_notification(
        state.twilio.as_ref(),
        &order,
        &items,
        NotificationKind::NewOrder,
    )
    .await;
    whatsapp_service::send_order_confirmation(state.twilio.as_ref(), &order, &items).await;

    tracing::info!("Order {} placed by user {}", order.id, user.id);

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "Order placed successfully".to_string(),
            order: OrderWithItems { order, items },
        }),
    ))
}

pub async fn my_orders(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<OrderListResponse>> {
    let orders = order_queries::get_user_orders(&state.db, user.id).await?;

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let all_items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    let mut items_map: HashMap<i32, Vec<_>> = HashMap::new();
    for item in all_items {
        items_map.entry(item.order_id).or_default().push(item);
    }

    let orders = orders
        .into_iter()
        .map(|order| {
            let items = items_map.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect();

    Ok(Json(OrderListResponse { orders }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i32>,
) -> Result<Json<SingleOrderResponse>> {
    let order = order_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if user.role != UserRole::Admin && order.user_id != user.id {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let items = order_queries::get_items_for_order(&state.db, order.id).await?;

    Ok(Json(SingleOrderResponse {
        order: OrderWithItems { order, items },
    }))
}

/// Admin listing. Customer display fields come from a second batched user
/// fetch stitched in here, not a SQL join.
pub async fn list_all_orders(
    State(state): State<AppState>,
) -> Result<Json<AdminOrderListResponse>> {
    let orders = order_queries::get_all_orders(&state.db).await?;

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let all_items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    let mut items_map: HashMap<i32, Vec<_>> = HashMap::new();
    for item in all_items {
        items_map.entry(item.order_id).or_default().push(item);
    }

    let mut user_ids: Vec<i32> = orders.iter().map(|o| o.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let customers: HashMap<i32, CustomerInfo> = user_queries::find_by_ids(&state.db, &user_ids)
        .await?
        .into_iter()
        .map(|u| {
            (
                u.id,
                CustomerInfo {
                    first_name: u.first_name,
                    last_name: u.last_name,
                    email: u.email,
                },
            )
        })
        .collect();

    let orders = orders
        .into_iter()
        .map(|order| {
            let items = items_map.remove(&order.id).unwrap_or_default();
            let customer = customers.get(&order.user_id).cloned();
            AdminOrder {
                order,
                items,
                customer,
            }
        })
        .collect();

    Ok(Json(AdminOrderListResponse { orders }))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdateResponse>> {
    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

    let order = order_queries::update_status(&state.db, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    let items = order_queries::get_items_for_order(&state.db, order.id).await?;

    whatsapp_service::send_order_notification(
        state.twilio.as_ref(),
        &order,
        &items,
        NotificationKind::StatusUpdate,
    )
    .await;

    tracing::info!("Order {} status set to {}", order.id, status.as_str());

    Ok(Json(StatusUpdateResponse {
        message: "Order status updated".to_string(),
        order: OrderWithItems { order, items },
    }))
}

fn validate_checkout(payload: &CheckoutRequest) -> Result<()> {
    let mut errors = Vec::new();

    if payload.delivery_address.trim().is_empty() {
        errors.push(FieldError::new(
            "deliveryAddress",
            "Delivery address is required",
        ));
    }

    if payload.phone.trim().is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
    }

    if payload.items.is_empty() {
        errors.push(FieldError::new("items", "Cart cannot be empty"));
    }

    for item in &payload.items {
        if item.quantity < 1 {
            errors.push(FieldError::new(
                "items",
                &format!("Invalid quantity for product {}", item.product_id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn compute_order_total(items: &[CheckoutItem]) -> Result<Decimal> {
    let mut total = Decimal::ZERO;

    for item in items {
        let price = parse_price(&item.price).ok_or_else(|| {
            AppError::Validation(vec![FieldError::new(
                "items",
                &format!("Invalid price for product {}", item.product_id),
            )])
        })?;

        total += price * Decimal::from(item.quantity);
    }

    // Always report two decimal places, "7.00" rather than "7"
    let mut total = total.round_dp(2);
    total.rescale(2);
    Ok(total)
}

fn parse_price(price: &str) -> Option<Decimal> {
    let trimmed = price.trim().trim_start_matches('$');

    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|d| !d.is_sign_negative())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, price: &str, quantity: i32) -> CheckoutItem {
        CheckoutItem {
            product_id: product_id.to_string(),
            product_name: product_id.to_string(),
            price: price.to_string(),
            quantity,
            merchant_id: "tarabay-market".to_string(),
        }
    }

    fn valid_request(items: Vec<CheckoutItem>) -> CheckoutRequest {
        CheckoutRequest {
            delivery_address: "Main St 12, Dmit".to_string(),
            phone: "+96170123456".to_string(),
            notes: None,
            items,
        }
    }

    #[test]
    fn parses_currency_formatted_prices() {
        assert_eq!(parse_price("$2.00"), Some(Decimal::new(200, 2)));
        assert_eq!(parse_price(" 3.99 "), Some(Decimal::new(399, 2)));
        assert_eq!(parse_price("$12.99"), Some(Decimal::new(1299, 2)));
    }

    #[test]
    fn rejects_unparseable_or_negative_prices() {
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("$-2.00"), None);
    }

    #[test]
    fn total_is_sum_of_price_times_quantity() {
        let items = vec![item("zaatar-manakish", "$2.00", 2), item("whole-milk", "$3.00", 1)];

        let total = compute_order_total(&items).unwrap();

        assert_eq!(total.to_string(), "7.00");
    }

    #[test]
    fn total_handles_uneven_prices() {
        let items = vec![item("fresh-apples", "$3.99", 3), item("tissues", "$3.49", 2)];

        let total = compute_order_total(&items).unwrap();

        assert_eq!(total.to_string(), "18.95");
    }

    #[test]
    fn total_fails_on_bad_price() {
        let items = vec![item("mystery", "n/a", 1)];

        assert!(compute_order_total(&items).is_err());
    }

    #[test]
    fn checkout_requires_items_address_and_phone() {
        let payload = CheckoutRequest {
            delivery_address: String::new(),
            phone: String::new(),
            notes: None,
            items: vec![],
        };

        match validate_checkout(&payload) {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["deliveryAddress", "phone", "items"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn checkout_rejects_zero_quantity() {
        let payload = valid_request(vec![item("tissues", "$3.49", 0)]);

        assert!(matches!(
            validate_checkout(&payload),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn checkout_accepts_well_formed_request() {
        let payload = valid_request(vec![item("tissues", "$3.49", 2)]);

        assert!(validate_checkout(&payload).is_ok());
    }
}
