use crate::auth::session::SessionUser;
use crate::domain::notification::{KindFilter, Notification, NotificationCounts, NotificationFilter};
use crate::templates::components::post_button;
use crate::templates::{desktop_layout, format_date};
use maud::{html, Markup};

pub struct NotificationsVm<'a> {
    pub viewer: &'a SessionUser,
    pub filter: NotificationFilter,
    pub counts: NotificationCounts,
    pub items: Vec<Notification>,
}

fn tab(label: &str, kind: &KindFilter, count: usize, active: &KindFilter) -> Markup {
    html! {
        a href=(format!("/student/notifications?kind={}", kind.as_param()))
          class=(if kind == active { "tab active" } else { "tab" }) {
            (label) " (" (count) ")"
        }
    }
}

pub fn notifications_page(vm: &NotificationsVm<'_>) -> Markup {
    let active = &vm.filter.kind;
    desktop_layout(
        "Notifications",
        Some(vm.viewer),
        html! {
            main class="container" {
                h1 { "Notifications" }

                nav class="tabs" {
                    (tab("All", &KindFilter::All, vm.counts.all, active))
                    (tab("Unread", &KindFilter::Unread, vm.counts.unread, active))
                    @for (kind, count) in &vm.counts.by_kind {
                        (tab(kind, &KindFilter::Kind(kind.clone()), *count, active))
                    }
                }

                form method="get" action="/student/notifications" class="inline" {
                    input type="hidden" name="kind" value=(active.as_param());
                    input type="search" name="q" placeholder="Search notifications" value=(vm.filter.query);
                    button type="submit" { "Search" }
                }

                div class="actions" {
                    @if vm.counts.unread > 0 {
                        (post_button("/student/notifications/read-all", "Mark all as read", "secondary"))
                    }
                    @if vm.counts.all > 0 {
                        (post_button("/student/notifications/clear", "Clear all", "danger"))
                    }
                }

                @if vm.items.is_empty() {
                    p class="empty-state" { "No notifications found." }
                }
                ul class="notifications" {
                    @for n in &vm.items {
                        li class=(if n.read { "notification" } else { "notification unread" }) {
                            h4 { (n.title) }
                            p { (n.message) }
                            p class="muted" { (format_date(n.created_at)) }
                            @if !n.read {
                                (post_button(&format!("/student/notifications/{}/read", n.id), "Mark as read", "link"))
                            }
                            (post_button(&format!("/student/notifications/{}/delete", n.id), "Delete", "link danger"))
                        }
                    }
                }
            }
        },
    )
}
