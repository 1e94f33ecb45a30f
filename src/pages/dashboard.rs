//! Dashboard: summary cards, budget alerts, insights, recent expenses
//! and the three charts.
//!
//! Load order within the page is summary -> alerts/insights/recent (one
//! payload) -> charts. Each chart slot fails independently; a broken
//! slot stays empty without taking the others down.

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::api;
use crate::charts::{Chart, DashboardCharts};
use crate::flash::{Flash, FlashBanner};
use crate::format;
use crate::models::DashboardData;
use crate::state::LoadPhase;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let data = use_state(|| None::<DashboardData>);
    let phase = use_state(LoadPhase::default);
    let flash = use_state(|| None::<Flash>);
    let charts = use_mut_ref(DashboardCharts::default);

    let category_ref = use_node_ref();
    let monthly_ref = use_node_ref();
    let comparison_ref = use_node_ref();

    {
        let data = data.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        let charts = charts.clone();
        let category_ref = category_ref.clone();
        let monthly_ref = monthly_ref.clone();
        let comparison_ref = comparison_ref.clone();
        use_effect_with_deps(
            move |_| {
                let charts_cleanup = charts.clone();
                spawn_local(async move {
                    match api::get_dashboard().await {
                        Ok(payload) => {
                            data.set(Some(payload));
                            phase.set(LoadPhase::Ready);
                        }
                        Err(_) => {
                            phase.set(LoadPhase::Failed("Failed to load dashboard data".into()));
                            flash.set(Some(Flash::error("Failed to load dashboard data")));
                        }
                    }

                    // Charts draw after the summary regardless of its
                    // outcome; each slot is its own failure domain. Fetch
                    // errors are already logged by the client.
                    if let Ok(series) = api::get_category_chart().await {
                        if let Some(canvas) = category_ref.cast::<HtmlCanvasElement>() {
                            match Chart::pie(canvas, &series) {
                                Ok(chart) => charts.borrow_mut().category.install(chart),
                                Err(err) => error!("Failed to draw category chart:", format!("{:?}", err)),
                            }
                        }
                    }

                    if let Ok(series) = api::get_monthly_chart().await {
                        if let Some(canvas) = monthly_ref.cast::<HtmlCanvasElement>() {
                            match Chart::line(canvas, &series) {
                                Ok(chart) => charts.borrow_mut().monthly.install(chart),
                                Err(err) => error!("Failed to draw monthly chart:", format!("{:?}", err)),
                            }
                        }
                    }

                    if let Ok(series) = api::get_comparison_chart().await {
                        if let Some(canvas) = comparison_ref.cast::<HtmlCanvasElement>() {
                            match Chart::comparison(canvas, &series) {
                                Ok(chart) => charts.borrow_mut().comparison.install(chart),
                                Err(err) => error!("Failed to draw comparison chart:", format!("{:?}", err)),
                            }
                        }
                    }
                });

                // Leaving the page tears every slot down.
                move || charts_cleanup.borrow_mut().dispose_all()
            },
            (),
        );
    }

    let on_dismiss = {
        let flash = flash.clone();
        Callback::from(move |_| flash.set(None))
    };

    let summary = match (&*phase, &*data) {
        (LoadPhase::Loading, _) => html! {
            <p class="text-sm text-muted-foreground">{"Loading dashboard..."}</p>
        },
        (LoadPhase::Failed(msg), _) => html! {
            <p class="text-sm text-red-600">{ msg.clone() }</p>
        },
        (LoadPhase::Ready, Some(d)) => render_summary(d),
        (LoadPhase::Ready, None) => html! {},
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Dashboard"}</h1>
            </div>

            <FlashBanner flash={(*flash).clone()} on_dismiss={on_dismiss} />

            { summary }

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-foreground text-lg mb-3">{"Spending by Category"}</h3>
                    <canvas ref={category_ref} width="420" height="260"></canvas>
                </div>
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <h3 class="font-bold text-foreground text-lg mb-3">{"Monthly Trend"}</h3>
                    <canvas ref={monthly_ref} width="420" height="260"></canvas>
                </div>
            </div>
            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h3 class="font-bold text-foreground text-lg mb-3">{"This Month vs Last Month"}</h3>
                <canvas ref={comparison_ref} width="880" height="260"></canvas>
            </div>
        </div>
    }
}

fn render_summary(data: &DashboardData) -> Html {
    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                { summary_card("This Week", data.this_week) }
                { summary_card("Last Week", data.last_week) }
                { summary_card("This Month", data.monthly_total) }
            </div>

            { week_change_line(data.week_change) }

            { if data.budget_alerts.is_empty() { html!{} } else {
                html! {
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{"Budget Alerts"}</h3>
                        <div class="space-y-2">
                            { for data.budget_alerts.iter().map(|alert| {
                                let tone = if alert.is_over {
                                    "bg-red-50 border-red-200 text-red-700"
                                } else {
                                    "bg-amber-50 border-amber-200 text-amber-700"
                                };
                                let detail = if alert.is_over {
                                    format!("Over budget by {}", format::currency(Some(alert.remaining.abs())))
                                } else {
                                    format!("Warning: {} remaining", format::percentage(100.0 - alert.percentage))
                                };
                                html! {
                                    <div class={format!("border rounded-lg px-4 py-3 text-sm {}", tone)}>
                                        <strong>{ format!("{}: ", alert.category) }</strong>
                                        { format!(
                                            "Spent {} of {} ({}) - {}",
                                            format::currency(Some(alert.spent)),
                                            format::currency(Some(alert.budget)),
                                            format::percentage(alert.percentage),
                                            detail,
                                        ) }
                                    </div>
                                }
                            }) }
                        </div>
                    </div>
                }
            }}

            { if data.insights.is_empty() { html!{} } else {
                html! {
                    <div class="bg-card rounded-[10px] p-6 border border-border">
                        <h3 class="font-bold text-foreground text-lg mb-3">{"Insights"}</h3>
                        <ul class="list-disc list-inside space-y-1 text-sm text-muted-foreground">
                            { for data.insights.iter().map(|insight| html! { <li>{ insight.clone() }</li> }) }
                        </ul>
                    </div>
                }
            }}

            <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                <div class="p-5 border-b border-border">
                    <h3 class="font-bold text-foreground text-lg">{"Recent Expenses"}</h3>
                </div>
                { if data.recent_expenses.is_empty() {
                    html! {
                        <p class="px-5 py-6 text-sm text-muted-foreground">
                            {"No expenses yet. Add your first expense from the Expenses page!"}
                        </p>
                    }
                } else {
                    html! {
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { for data.recent_expenses.iter().map(|expense| html! {
                                        <tr class="text-sm hover:bg-muted/30 transition-colors">
                                            <td class="px-8 py-4 text-muted-foreground">{ expense.date.clone() }</td>
                                            <td class="px-8 py-4 text-foreground">{ expense.description.clone() }</td>
                                            <td class="px-8 py-4">
                                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ expense.category.clone() }</span>
                                            </td>
                                            <td class="px-8 py-4 text-right font-semibold text-foreground">{ format::currency(Some(expense.amount)) }</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        </div>
                    }
                }}
            </div>
        </>
    }
}

fn summary_card(title: &'static str, amount: Option<f64>) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
            <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ title }</p>
            <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ format::currency(amount) }</h3>
        </div>
    }
}

fn week_change_line(change: f64) -> Html {
    if change == 0.0 {
        return html! {};
    }
    let class = if change > 0.0 {
        "text-sm font-semibold text-red-600"
    } else {
        "text-sm font-semibold text-green-600"
    };
    html! {
        <p class={class}>{ format!("{:.1}% vs last week", change) }</p>
    }
}
