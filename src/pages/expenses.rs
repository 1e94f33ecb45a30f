//! Expense list with filters, plus the add/edit form. The filter state
//! is read from the live controls every time a request is built; the
//! list container is fully replaced on every load.

use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::filters::ExpenseFilters;
use crate::flash::{Flash, FlashBanner};
use crate::format;
use crate::models::{Expense, ExpensePayload, CATEGORIES};
use crate::state::{EditMode, LoadPhase};

const DEFAULT_SORT: &str = "date_desc";

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message("Are you sure you want to delete this expense?").ok())
        .unwrap_or(false)
}

/// Gate between the prompt answer and the request: a declined prompt
/// yields nothing to delete.
fn confirmed_delete_id(id: i64, confirm: impl Fn() -> bool) -> Option<i64> {
    if confirm() {
        Some(id)
    } else {
        None
    }
}

/// The add/edit form as one value. Routing and reset are plain methods
/// on it, separate from the handlers that drive the network.
#[derive(Clone, Default, PartialEq)]
struct ExpenseForm {
    mode: EditMode,
    description: String,
    amount: String,
    category: String,
    date: String,
}

impl ExpenseForm {
    /// Empty create-mode form, dated `today`. Saving and cancelling an
    /// edit both come back through here.
    fn blank(today: String) -> Self {
        ExpenseForm { date: today, ..Default::default() }
    }

    /// Form populated from a fetched record, switched into edit mode.
    fn from_expense(expense: Expense) -> Self {
        ExpenseForm {
            mode: EditMode::Editing(expense.id),
            description: expense.description,
            amount: expense.amount.to_string(),
            category: expense.category,
            date: expense.date,
        }
    }

    /// Validates the controls and decides which mutation this submit
    /// performs. An editing form always routes to update, never create.
    fn save_request(&self) -> Result<SaveRequest, &'static str> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|_| "Amount must be a number")?;
        let description = self.description.trim().to_string();
        if description.is_empty() || self.category.is_empty() || self.date.is_empty() {
            return Err("Please complete all fields");
        }
        let payload = ExpensePayload {
            description,
            amount,
            category: self.category.clone(),
            date: self.date.clone(),
        };
        Ok(match self.mode {
            EditMode::Editing(id) => SaveRequest::Update(id, payload),
            EditMode::Create => SaveRequest::Create(payload),
        })
    }
}

#[derive(Debug)]
enum SaveRequest {
    Create(ExpensePayload),
    Update(i64, ExpensePayload),
}

impl SaveRequest {
    fn success_text(&self) -> &'static str {
        match self {
            SaveRequest::Create(_) => "Expense added successfully!",
            SaveRequest::Update(..) => "Expense updated successfully!",
        }
    }

    async fn send(self) -> Result<serde_json::Value, api::ApiError> {
        match self {
            SaveRequest::Create(payload) => api::create_expense(&payload).await,
            SaveRequest::Update(id, payload) => api::update_expense(id, &payload).await,
        }
    }
}

/// Fetches the filtered list and replaces the rendered rows. Category
/// options are taken from the first non-empty result set and kept
/// afterwards, so narrowing a filter never shrinks the dropdown.
async fn load_expenses(
    filters: ExpenseFilters,
    expenses: UseStateHandle<Vec<Expense>>,
    categories: UseStateHandle<Vec<String>>,
    phase: UseStateHandle<LoadPhase>,
    flash: UseStateHandle<Option<Flash>>,
) {
    phase.set(LoadPhase::Loading);
    match api::get_expenses(&filters).await {
        Ok(data) => {
            if categories.is_empty() && !data.categories.is_empty() {
                categories.set(data.categories);
            }
            expenses.set(data.expenses);
            phase.set(LoadPhase::Ready);
        }
        Err(_) => {
            phase.set(LoadPhase::Failed("Failed to load expenses".into()));
            flash.set(Some(Flash::error("Failed to load expenses")));
        }
    }
}

#[function_component(ExpensesPage)]
pub fn expenses_page() -> Html {
    // Filter controls.
    let search = use_state(String::new);
    let filter_category = use_state(String::new);
    let date_from = use_state(String::new);
    let date_to = use_state(String::new);
    let sort = use_state(|| DEFAULT_SORT.to_string());

    // List state.
    let expenses = use_state(Vec::<Expense>::new);
    let categories = use_state(Vec::<String>::new);
    let phase = use_state(LoadPhase::default);

    // Form state.
    let form = use_state(ExpenseForm::default);
    let saving = use_state(|| false);

    let flash = use_state(|| None::<Flash>);

    let current_filters = {
        let search = search.clone();
        let filter_category = filter_category.clone();
        let date_from = date_from.clone();
        let date_to = date_to.clone();
        let sort = sort.clone();
        move || ExpenseFilters {
            search: (*search).clone(),
            category: (*filter_category).clone(),
            date_from: (*date_from).clone(),
            date_to: (*date_to).clone(),
            sort: (*sort).clone(),
        }
    };

    {
        let form = form.clone();
        let expenses = expenses.clone();
        let categories = categories.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        let current_filters = current_filters.clone();
        use_effect_with_deps(
            move |_| {
                form.set(ExpenseForm::blank(format::today()));
                spawn_local(async move {
                    load_expenses(current_filters(), expenses, categories, phase, flash).await;
                });
                || ()
            },
            (),
        );
    }

    let on_filter_submit = {
        let expenses = expenses.clone();
        let categories = categories.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        let current_filters = current_filters.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let expenses = expenses.clone();
            let categories = categories.clone();
            let phase = phase.clone();
            let flash = flash.clone();
            let filters = current_filters();
            spawn_local(async move {
                load_expenses(filters, expenses, categories, phase, flash).await;
            });
        })
    };

    let on_clear_filters = {
        let search = search.clone();
        let filter_category = filter_category.clone();
        let date_from = date_from.clone();
        let date_to = date_to.clone();
        let sort = sort.clone();
        let expenses = expenses.clone();
        let categories = categories.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        Callback::from(move |_| {
            search.set(String::new());
            filter_category.set(String::new());
            date_from.set(String::new());
            date_to.set(String::new());
            sort.set(DEFAULT_SORT.to_string());
            let expenses = expenses.clone();
            let categories = categories.clone();
            let phase = phase.clone();
            let flash = flash.clone();
            // The handles above still hold the old values this render;
            // the cleared filter set is passed explicitly.
            let filters = ExpenseFilters {
                sort: DEFAULT_SORT.to_string(),
                ..Default::default()
            };
            spawn_local(async move {
                load_expenses(filters, expenses, categories, phase, flash).await;
            });
        })
    };

    let on_form_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let flash = flash.clone();
        let expenses = expenses.clone();
        let categories = categories.clone();
        let phase = phase.clone();
        let current_filters = current_filters.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = match form.save_request() {
                Ok(request) => request,
                Err(msg) => {
                    flash.set(Some(Flash::error(msg)));
                    return;
                }
            };

            saving.set(true);
            let success_text = request.success_text();
            let form = form.clone();
            let saving = saving.clone();
            let flash = flash.clone();
            let expenses = expenses.clone();
            let categories = categories.clone();
            let phase = phase.clone();
            let filters = current_filters();
            spawn_local(async move {
                match request.send().await {
                    Ok(_) => {
                        form.set(ExpenseForm::blank(format::today()));
                        flash.set(Some(Flash::success(success_text)));
                        // The mutation is settled only once the dependent
                        // list has reloaded.
                        load_expenses(filters, expenses, categories, phase, flash.clone()).await;
                    }
                    Err(err) => {
                        let text = match err {
                            api::ApiError::Backend(msg) => msg,
                            api::ApiError::Network(_) => "Failed to save expense".to_string(),
                        };
                        // Leave the form populated so the user can retry.
                        flash.set(Some(Flash::error(text)));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_cancel_edit = {
        let form = form.clone();
        Callback::from(move |_| form.set(ExpenseForm::blank(format::today())))
    };

    let edit_expense = {
        let form = form.clone();
        let flash = flash.clone();
        move |id: i64| {
            let form = form.clone();
            let flash = flash.clone();
            Callback::from(move |_| {
                let form = form.clone();
                let flash = flash.clone();
                spawn_local(async move {
                    match api::get_expense(id).await {
                        Ok(detail) => form.set(ExpenseForm::from_expense(detail.expense)),
                        Err(err) => {
                            let text = match err {
                                api::ApiError::Backend(msg) => msg,
                                api::ApiError::Network(_) => "Failed to load expense".to_string(),
                            };
                            flash.set(Some(Flash::error(text)));
                        }
                    }
                });
            })
        }
    };

    let delete_expense = {
        let expenses = expenses.clone();
        let categories = categories.clone();
        let phase = phase.clone();
        let flash = flash.clone();
        let current_filters = current_filters.clone();
        move |id: i64| {
            let expenses = expenses.clone();
            let categories = categories.clone();
            let phase = phase.clone();
            let flash = flash.clone();
            let current_filters = current_filters.clone();
            Callback::from(move |_| {
                // Nothing happens without an explicit confirmation.
                let Some(id) = confirmed_delete_id(id, confirm_delete) else {
                    return;
                };
                let expenses = expenses.clone();
                let categories = categories.clone();
                let phase = phase.clone();
                let flash = flash.clone();
                let filters = current_filters();
                spawn_local(async move {
                    match api::delete_expense(id).await {
                        Ok(_) => {
                            flash.set(Some(Flash::success("Expense deleted successfully!")));
                            load_expenses(filters, expenses, categories, phase, flash.clone()).await;
                        }
                        Err(err) => {
                            let text = match err {
                                api::ApiError::Backend(msg) => msg,
                                api::ApiError::Network(_) => "Failed to delete expense".to_string(),
                            };
                            flash.set(Some(Flash::error(text)));
                        }
                    }
                });
            })
        }
    };

    let on_export = {
        let flash = flash.clone();
        Callback::from(move |_| {
            let flash = flash.clone();
            spawn_local(async move {
                if let Err(err) = api::export_expenses().await {
                    let text = match err {
                        api::ApiError::Backend(msg) => msg,
                        api::ApiError::Network(_) => "Export failed".to_string(),
                    };
                    flash.set(Some(Flash::error(text)));
                }
            });
        })
    };

    let on_dismiss = {
        let flash = flash.clone();
        Callback::from(move |_| flash.set(None))
    };

    let text_value = |handle: &UseStateHandle<String>| (**handle).clone();
    let bind_input = |handle: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };
    let bind_select = |handle: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            handle.set(select.value());
        })
    };

    let edit_field = {
        let form = form.clone();
        move |apply: fn(&mut ExpenseForm, String)| {
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                let mut next = (*form).clone();
                apply(&mut next, input.value());
                form.set(next);
            })
        }
    };
    let edit_select = {
        let form = form.clone();
        move |apply: fn(&mut ExpenseForm, String)| {
            let form = form.clone();
            Callback::from(move |e: Event| {
                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                let mut next = (*form).clone();
                apply(&mut next, select.value());
                form.set(next);
            })
        }
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Expenses"}</h1>
                <button onclick={on_export} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    {"Export CSV"}
                </button>
            </div>

            <FlashBanner flash={(*flash).clone()} on_dismiss={on_dismiss} />

            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{ form.mode.form_title() }</h4>
                <form onsubmit={on_form_submit}>
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-4">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Description"}</label>
                            <input type="text" placeholder="What did you spend on?" value={form.description.clone()}
                                oninput={edit_field(|f, v| f.description = v)}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Amount ($)"}</label>
                            <input type="number" step="0.01" placeholder="0.00" value={form.amount.clone()}
                                oninput={edit_field(|f, v| f.amount = v)}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                            <select value={form.category.clone()} onchange={edit_select(|f, v| f.category = v)}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none">
                                <option value="" selected={form.category.is_empty()}>{"Select category"}</option>
                                { for CATEGORIES.iter().map(|cat| html! {
                                    <option value={*cat} selected={form.category == *cat}>{ *cat }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Date"}</label>
                            <input type="date" value={form.date.clone()}
                                oninput={edit_field(|f, v| f.date = v)}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        </div>
                    </div>
                    <div class="flex gap-3">
                        <button type="submit" disabled={*saving}
                            class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">
                            { if *saving { "Saving..." } else { form.mode.submit_label() } }
                        </button>
                        { if form.mode.is_editing() {
                            html! {
                                <button type="button" onclick={on_cancel_edit.clone()}
                                    class="bg-[#B2CBDE] text-[#173E63] px-6 py-2 rounded-[10px] text-[10px] font-bold">
                                    {"Cancel"}
                                </button>
                            }
                        } else { html!{} }}
                    </div>
                </form>
            </div>

            <div class="bg-card rounded-[10px] p-6 border border-border">
                <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{"Filter Expenses"}</h4>
                <form onsubmit={on_filter_submit}>
                    <div class="grid grid-cols-2 md:grid-cols-5 gap-3 mb-4">
                        <input type="text" placeholder="Search description..." value={text_value(&search)}
                            oninput={bind_input(search.clone())}
                            class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        <select value={text_value(&filter_category)} onchange={bind_select(filter_category.clone())}
                            class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none">
                            <option value="" selected={filter_category.is_empty()}>{"All Categories"}</option>
                            { for categories.iter().map(|cat| html! {
                                <option value={cat.clone()} selected={*filter_category == *cat}>{ cat.clone() }</option>
                            }) }
                        </select>
                        <input type="date" value={text_value(&date_from)}
                            oninput={bind_input(date_from.clone())}
                            class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        <input type="date" value={text_value(&date_to)}
                            oninput={bind_input(date_to.clone())}
                            class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none" />
                        <select value={text_value(&sort)} onchange={bind_select(sort.clone())}
                            class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none">
                            <option value="date_desc" selected={*sort == "date_desc"}>{"Newest first"}</option>
                            <option value="date_asc" selected={*sort == "date_asc"}>{"Oldest first"}</option>
                            <option value="amount_desc" selected={*sort == "amount_desc"}>{"Highest amount"}</option>
                            <option value="amount_asc" selected={*sort == "amount_asc"}>{"Lowest amount"}</option>
                        </select>
                    </div>
                    <div class="flex gap-3">
                        <button type="submit" class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold">{"Apply Filters"}</button>
                        <button type="button" onclick={on_clear_filters} class="bg-[#D8E1E8] text-[#173E63] px-6 py-2 rounded-[10px] text-[10px] font-bold">{"Clear"}</button>
                    </div>
                </form>
            </div>

            <div class="bg-card rounded-[10px] border border-border overflow-hidden">
                <div class="p-5 border-b border-border flex items-center justify-between">
                    <h3 class="font-bold text-lg text-foreground">{"Expense History"}</h3>
                    <span class="text-xs text-muted-foreground">{ format!("{} expenses", expenses.len()) }</span>
                </div>
                <div class="overflow-x-auto">
                    { if phase.is_loading() {
                        html! { <p class="px-8 py-6 text-center text-sm text-muted-foreground">{"Loading..."}</p> }
                    } else if expenses.is_empty() {
                        html! {
                            <p class="px-8 py-6 text-center text-sm text-muted-foreground">
                                {"No expenses found. Add your first expense above!"}
                            </p>
                        }
                    } else {
                        html! {
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-8 py-4 font-bold">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { for expenses.iter().map(|expense| {
                                        let on_edit = edit_expense(expense.id);
                                        let on_delete = delete_expense(expense.id);
                                        html! {
                                            <tr key={expense.id} class="text-sm hover:bg-muted/40 transition-colors">
                                                <td class="px-8 py-4 text-muted-foreground">{ expense.date.clone() }</td>
                                                <td class="px-8 py-4 text-foreground">{ expense.description.clone() }</td>
                                                <td class="px-8 py-4">
                                                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ expense.category.clone() }</span>
                                                </td>
                                                <td class="px-8 py-4 text-right font-semibold text-foreground">{ format::currency(Some(expense.amount)) }</td>
                                                <td class="px-8 py-4">
                                                    <button onclick={on_edit} class="text-[#1D617A] font-bold text-xs mr-3">{"Edit"}</button>
                                                    <button onclick={on_delete} class="text-red-600 font-bold text-xs">{"Delete"}</button>
                                                </td>
                                            </tr>
                                        }
                                    }) }
                                </tbody>
                            </table>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn filled_form(mode: EditMode) -> ExpenseForm {
        ExpenseForm {
            mode,
            description: "Groceries".into(),
            amount: "42.50".into(),
            category: "Food".into(),
            date: "2024-01-15".into(),
        }
    }

    #[test]
    fn editing_form_routes_to_update_with_its_id() {
        let request = filled_form(EditMode::Editing(17)).save_request().unwrap();
        match request {
            SaveRequest::Update(id, payload) => {
                assert_eq!(id, 17);
                assert_eq!(payload.description, "Groceries");
                assert_eq!(payload.amount, 42.5);
            }
            SaveRequest::Create(_) => panic!("an edit submit must never create"),
        }
    }

    #[test]
    fn create_form_routes_to_create() {
        let request = filled_form(EditMode::Create).save_request().unwrap();
        assert!(matches!(request, SaveRequest::Create(_)));
        assert_eq!(request.success_text(), "Expense added successfully!");
    }

    #[test]
    fn saving_resets_to_a_blank_create_form() {
        let cleared = ExpenseForm::blank("2024-02-01".to_string());
        assert_eq!(cleared.mode, EditMode::Create);
        assert!(cleared.description.is_empty());
        assert!(cleared.amount.is_empty());
        assert!(cleared.category.is_empty());
        assert_eq!(cleared.date, "2024-02-01");
    }

    #[test]
    fn loading_an_expense_enters_edit_mode() {
        let form = ExpenseForm::from_expense(Expense {
            id: 3,
            description: "Bus".into(),
            amount: 2.75,
            category: "Transport".into(),
            date: "2024-01-02".into(),
        });
        assert_eq!(form.mode, EditMode::Editing(3));
        assert_eq!(form.amount, "2.75");
    }

    #[test]
    fn invalid_amount_is_rejected_before_any_request() {
        let mut form = filled_form(EditMode::Create);
        form.amount = "abc".into();
        assert_eq!(form.save_request().unwrap_err(), "Amount must be a number");
    }

    #[test]
    fn incomplete_form_is_rejected() {
        let mut form = filled_form(EditMode::Editing(4));
        form.category.clear();
        assert_eq!(form.save_request().unwrap_err(), "Please complete all fields");
    }

    #[test]
    fn cancelled_confirmation_blocks_the_delete() {
        let asked = Cell::new(0u32);
        let decision = confirmed_delete_id(9, || {
            asked.set(asked.get() + 1);
            false
        });
        assert_eq!(decision, None);
        assert_eq!(asked.get(), 1, "the prompt must still be shown");
    }

    #[test]
    fn confirmed_delete_passes_the_id_through() {
        assert_eq!(confirmed_delete_id(9, || true), Some(9));
    }
}
