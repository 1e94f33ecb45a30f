//! Monthly budgets: a set-budget form plus the status list the backend
//! derives (spent, remaining, percentage, over/warning flags).

use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::flash::{Flash, FlashBanner};
use crate::format;
use crate::models::{BudgetPayload, BudgetStatus, CATEGORIES};
use crate::state::LoadPhase;

async fn load_budgets(
    budgets: UseStateHandle<Vec<BudgetStatus>>,
    phase: UseStateHandle<LoadPhase>,
    flash: UseStateHandle<Option<Flash>>,
) {
    phase.set(LoadPhase::Loading);
    match api::get_budgets().await {
        Ok(data) => {
            budgets.set(data.budgets);
            phase.set(LoadPhase::Ready);
        }
        Err(_) => {
            phase.set(LoadPhase::Failed("Failed to load budgets".into()));
            flash.set(Some(Flash::error("Failed to load budgets")));
        }
    }
}

#[function_component(BudgetsPage)]
pub fn budgets_page() -> Html {
    let budgets = use_state(Vec::<BudgetStatus>::new);
    let phase = use_state(LoadPhase::default);
    let category = use_state(String::new);
    let amount = use_state(String::new);
    let saving = use_state(|| false);
    let flash = use_state(|| None::<Flash>);

    {
        let budgets = budgets.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    load_budgets(budgets, phase, flash).await;
                });
                || ()
            },
            (),
        );
    }

    let on_submit = {
        let category = category.clone();
        let amount = amount.clone();
        let saving = saving.clone();
        let budgets = budgets.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let category_val = (*category).clone();
            let amount_val = match amount.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    flash.set(Some(Flash::error("Budget amount must be a number")));
                    return;
                }
            };
            if category_val.is_empty() {
                flash.set(Some(Flash::error("Please choose a category")));
                return;
            }

            saving.set(true);
            let payload = BudgetPayload { category: category_val, amount: amount_val };
            let category = category.clone();
            let amount = amount.clone();
            let saving = saving.clone();
            let budgets = budgets.clone();
            let phase = phase.clone();
            let flash = flash.clone();
            spawn_local(async move {
                match api::create_budget(&payload).await {
                    Ok(_) => {
                        category.set(String::new());
                        amount.set(String::new());
                        flash.set(Some(Flash::success("Budget set successfully!")));
                        load_budgets(budgets, phase, flash.clone()).await;
                    }
                    Err(err) => {
                        let text = match err {
                            api::ApiError::Backend(msg) => msg,
                            api::ApiError::Network(_) => "Failed to set budget".to_string(),
                        };
                        flash.set(Some(Flash::error(text)));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_dismiss = {
        let flash = flash.clone();
        Callback::from(move |_| flash.set(None))
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Budgets"}</h1>
            </div>

            <FlashBanner flash={(*flash).clone()} on_dismiss={on_dismiss} />

            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Set Monthly Budget"}</h4>
                <form onsubmit={on_submit}>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        <select value={(*category).clone()} onchange={{
                            let category = category.clone();
                            Callback::from(move |e: Event| {
                                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                category.set(select.value());
                            })
                        }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none">
                            <option value="" selected={category.is_empty()}>{"Select category"}</option>
                            { for CATEGORIES.iter().map(|cat| html! {
                                <option value={*cat} selected={*category == *cat}>{ *cat }</option>
                            }) }
                        </select>
                        <input type="number" step="0.01" placeholder="Monthly limit ($)" value={(*amount).clone()} oninput={{
                            let amount = amount.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                amount.set(input.value());
                            })
                        }} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        <button type="submit" disabled={*saving}
                            class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                            { if *saving { "Saving..." } else { "Set Budget" } }
                        </button>
                    </div>
                </form>
            </div>

            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h3 class="font-bold text-foreground text-lg mb-4">{"Budget Status"}</h3>
                { if phase.is_loading() {
                    html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> }
                } else if budgets.is_empty() {
                    html! { <p class="text-sm text-muted-foreground">{"No budgets set. Pick a category above to start."}</p> }
                } else {
                    html! {
                        <div class="space-y-3">
                            { for budgets.iter().map(render_budget) }
                        </div>
                    }
                }}
            </div>
        </div>
    }
}

fn render_budget(status: &BudgetStatus) -> Html {
    let bar_width = status.percentage.clamp(0.0, 100.0);
    let bar_color = if status.is_over {
        "#dc2626"
    } else if status.is_warning {
        "#d97706"
    } else {
        "#173E63"
    };

    html! {
        <div class="flex flex-col gap-1 p-3 border border-border rounded-[10px]">
            <div class="flex items-center justify-between">
                <span class="font-semibold text-foreground">{ status.budget.category.clone() }</span>
                <span class="text-sm text-muted-foreground">
                    { format!("{} / month", format::currency(Some(status.budget.amount))) }
                </span>
            </div>
            <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                <div class="h-full" style={format!("width: {}%; background: {}", bar_width, bar_color)}></div>
            </div>
            <div class="flex items-center justify-between text-xs text-muted-foreground">
                <span>{ format!("Spent: {}", format::currency(Some(status.spent))) }</span>
                <span>{ format!("Remaining: {}", format::currency(Some(status.remaining))) }</span>
                <span>{ format::percentage(status.percentage) }</span>
            </div>
        </div>
    }
}
