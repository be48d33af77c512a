use crate::{
    config::TwilioConfig,
    error::{AppError, Result},
    models::{Order, OrderItem},
};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Clone, Copy)]
pub enum NotificationKind {
    NewOrder,
    StatusUpdate,
}

/// Alerts the operations and delivery numbers about a new order or a status
/// change. Best effort: failures are logged and swallowed, never surfaced
/// to the caller.
pub async fn send_order_notification(
    twilio: Option<&TwilioConfig>,
    order: &Order,
    items: &[OrderItem],
    kind: NotificationKind,
) {
    let Some(config) = twilio else {
        tracing::info!("WhatsApp notifications disabled - Twilio not configured");
        return;
    };

    let message = match kind {
        NotificationKind::NewOrder => format_new_order_message(order, items),
        NotificationKind::StatusUpdate => format_status_update_message(order),
    };

    let mut delivered = true;
    for recipient in [&config.admin_number, &config.delivery_number] {
        if let Err(e) = send_whatsapp(config, recipient, &message).await {
            tracing::warn!("Failed to send WhatsApp notification for order {}: {}", order.id, e);
            delivered = false;
        }
    }

    if delivered {
        tracing::info!("WhatsApp notifications sent for order {}", order.id);
    }
}

/// Confirmation message to the customer's own phone. Same best-effort
/// contract as [`send_order_notification`].
pub async fn send_order_confirmation(twilio: Option<&TwilioConfig>, order: &Order, items: &[OrderItem]) {
    let Some(config) = twilio else {
        tracing::info!("Order confirmation disabled - Twilio not configured");
        return;
    };

    let message = format_confirmation_message(order, items);

    if let Err(e) = send_whatsapp(config, &order.phone, &message).await {
        tracing::warn!("Failed to send order confirmation for order {}: {}", order.id, e);
        return;
    }

    tracing::info!("Order confirmation sent to customer for order {}", order.id);
}

async fn send_whatsapp(config: &TwilioConfig, to: &str, body: &str) -> Result<()> {
    let url = format!(
        "{}/Accounts/{}/Messages.json",
        TWILIO_API_BASE, config.account_sid
    );

    let params = [
        ("From", format!("whatsapp:{}", config.from_number)),
        ("To", format!("whatsapp:{}", to)),
        ("Body", body.to_string()),
    ];

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .basic_auth(&config.account_sid, Some(&config.auth_token))
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Twilio API request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::InternalError(format!(
            "Twilio API error {}: {}",
            status, body
        )));
    }

    Ok(())
}

fn format_items(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| format!("- {} x{} - {}", item.product_name, item.quantity, item.price))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_new_order_message(order: &Order, items: &[OrderItem]) -> String {
    format!(
        "NEW ORDER #{}\n\
         Customer: {}\n\
         Address: {}\n\
         Total: ${}\n\
         Items:\n{}\n\
         Notes: {}\n\
         Ordered at: {}",
        order.id,
        order.phone,
        order.delivery_address,
        order.total,
        format_items(items),
        order.notes.as_deref().unwrap_or("None"),
        order.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn format_status_update_message(order: &Order) -> String {
    format!(
        "ORDER #{} UPDATE\n\
         Status: {}\n\
         Customer: {}\n\
         Total: ${}",
        order.id,
        order.status.label(),
        order.phone,
        order.total,
    )
}

fn format_confirmation_message(order: &Order, items: &[OrderItem]) -> String {
    format!(
        "Order confirmed!\n\
         Order #{}\n\
         Total: ${}\n\
         Items:\n{}\n\
         Delivery to: {}\n\
         We'll notify you when your order is out for delivery!",
        order.id,
        order.total,
        format_items(items),
        order.delivery_address,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sample_order() -> Order {
        Order {
            id: 7,
            user_id: 1,
            total: Decimal::new(700, 2),
            status: OrderStatus::OutForDelivery,
            delivery_address: "Main St 12, Dmit".to_string(),
            phone: "+96170123456".to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_items() -> Vec<OrderItem> {
        vec![
            OrderItem {
                id: 1,
                order_id: 7,
                product_id: "zaatar-manakish".to_string(),
                product_name: "Zaatar Manakish".to_string(),
                price: "$2.00".to_string(),
                quantity: 2,
                merchant_id: "afran-manakish".to_string(),
            },
            OrderItem {
                id: 2,
                order_id: 7,
                product_id: "whole-milk".to_string(),
                product_name: "Whole Milk (1L)".to_string(),
                price: "$3.00".to_string(),
                quantity: 1,
                merchant_id: "tarabay-market".to_string(),
            },
        ]
    }

    #[test]
    fn new_order_message_lists_every_item() {
        let message = format_new_order_message(&sample_order(), &sample_items());

        assert!(message.starts_with("NEW ORDER #7"));
        assert!(message.contains("- Zaatar Manakish x2 - $2.00"));
        assert!(message.contains("- Whole Milk (1L) x1 - $3.00"));
        assert!(message.contains("Total: $7.00"));
        assert!(message.contains("Notes: None"));
    }

    #[test]
    fn status_update_message_uses_readable_label() {
        let message = format_status_update_message(&sample_order());

        assert!(message.contains("ORDER #7 UPDATE"));
        assert!(message.contains("Status: OUT FOR DELIVERY"));
    }

    #[test]
    fn confirmation_message_addresses_the_customer() {
        let message = format_confirmation_message(&sample_order(), &sample_items());

        assert!(message.contains("Order #7"));
        assert!(message.contains("Delivery to: Main St 12, Dmit"));
    }
}
