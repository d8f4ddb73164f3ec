use repairtrack_shared::ServiceOrder;

/// Case-insensitive substring match on order number, client name, or
/// provider name. An empty or blank query matches everything.
pub fn matches(order: &ServiceOrder, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |s: &str| s.to_lowercase().contains(&needle);
    hit(&order.service_order_number)
        || hit(&order.client_name)
        || order.service_provider_name.as_deref().is_some_and(hit)
}

pub fn filter_orders<'a>(orders: &'a [ServiceOrder], query: Option<&str>) -> Vec<&'a ServiceOrder> {
    orders
        .iter()
        .filter(|o| query.map_or(true, |q| matches(o, q)))
        .collect()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::testing::order;

    fn named(number: &str, client: &str, provider: Option<&str>) -> ServiceOrder {
        let mut o = order(Uuid::new_v4(), number, false);
        o.client_name = client.into();
        o.service_provider_name = provider.map(Into::into);
        o
    }

    #[test]
    fn matches_any_of_three_fields() {
        let o = named("OS-2024-17", "Padaria Estrela", Some("TecnoFix"));
        assert!(matches(&o, "2024"));
        assert!(matches(&o, "estrela"));
        assert!(matches(&o, "TECNO"));
        assert!(!matches(&o, "notes"));
        assert!(matches(&o, "  "));
    }

    #[test]
    fn unresolved_provider_name_never_matches() {
        let o = named("1", "A", None);
        assert!(!matches(&o, &o.service_provider_id.to_string()));
    }

    #[test]
    fn filter_keeps_order() {
        let orders = vec![
            named("1", "Alpha", None),
            named("2", "Beta", None),
            named("3", "alphabet", None),
        ];
        let hits: Vec<_> = filter_orders(&orders, Some("alpha"))
            .into_iter()
            .map(|o| o.service_order_number.as_str())
            .collect();
        assert_eq!(hits, vec!["1", "3"]);
        assert_eq!(filter_orders(&orders, None).len(), 3);
    }
}
