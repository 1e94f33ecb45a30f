//! CSV import. The file picker is gated client-side: anything that is
//! not a .csv never reaches the network.

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::flash::{import_flash, Flash, FlashBanner};

/// How long the outcome message stays on screen before the page hands
/// control back to the expense list.
const REDIRECT_MS: u32 = 2_000;

fn is_csv_filename(name: &str) -> bool {
    name.rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
        && name.len() > 4
}

#[derive(Properties, PartialEq)]
pub struct UploadPageProps {
    /// Fired once an import finishes and the outcome has been shown.
    pub on_imported: Callback<()>,
}

#[function_component(UploadPage)]
pub fn upload_page(props: &UploadPageProps) -> Html {
    let file_ref = use_node_ref();
    let uploading = use_state(|| false);
    let flash = use_state(|| None::<Flash>);
    let redirect = use_mut_ref(|| None::<Timeout>);

    {
        let redirect = redirect.clone();
        use_effect_with_deps(
            move |_| move || { redirect.borrow_mut().take(); },
            (),
        );
    }

    let on_submit = {
        let file_ref = file_ref.clone();
        let uploading = uploading.clone();
        let flash = flash.clone();
        let redirect = redirect.clone();
        let on_imported = props.on_imported.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(input) = file_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                flash.set(Some(Flash::error("Please choose a file to upload")));
                return;
            };
            if !is_csv_filename(&file.name()) {
                flash.set(Some(Flash::error("Please select a CSV file")));
                return;
            }

            uploading.set(true);
            flash.set(Some(Flash::info("Uploading and processing file...")));

            let input = input.clone();
            let uploading = uploading.clone();
            let flash = flash.clone();
            let redirect = redirect.clone();
            let on_imported = on_imported.clone();
            spawn_local(async move {
                match api::upload_csv(&file).await {
                    Ok(outcome) => {
                        flash.set(Some(import_flash(&outcome)));
                        input.set_value("");
                        let on_imported = on_imported.clone();
                        *redirect.borrow_mut() = Some(Timeout::new(REDIRECT_MS, move || {
                            on_imported.emit(());
                        }));
                    }
                    Err(err) => {
                        let text = match err {
                            api::ApiError::Backend(msg) => msg,
                            api::ApiError::Network(_) => "Upload failed".to_string(),
                        };
                        flash.set(Some(Flash::error(text)));
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_dismiss = {
        let flash = flash.clone();
        Callback::from(move |_| flash.set(None))
    };

    html! {
        <div class="p-6 max-w-3xl mx-auto space-y-6">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Import Expenses"}</h1>
            </div>

            <FlashBanner flash={(*flash).clone()} on_dismiss={on_dismiss} />

            <div class="bg-card rounded-[10px] p-6 border border-border space-y-4">
                <p class="text-sm text-muted-foreground">
                    {"Upload a CSV file with columns: date, description, category, amount. \
                      Rows that fail to parse are skipped and counted."}
                </p>
                <form onsubmit={on_submit} class="space-y-4">
                    <input
                        ref={file_ref}
                        type="file"
                        accept=".csv"
                        class="block w-full text-sm text-muted-foreground file:mr-4 file:py-2 file:px-4 file:rounded-[10px] file:border-0 file:bg-[#173E63] file:text-white file:text-[10px] file:font-bold"
                    />
                    <button
                        type="submit"
                        disabled={*uploading}
                        class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] text-[10px] font-bold"
                    >
                        { if *uploading { "Uploading..." } else { "Upload CSV" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::is_csv_filename;

    #[test]
    fn accepts_csv_extension_any_case() {
        assert!(is_csv_filename("expenses.csv"));
        assert!(is_csv_filename("EXPORT.CSV"));
        assert!(is_csv_filename("report.2024.Csv"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_csv_filename("expenses.xlsx"));
        assert!(!is_csv_filename("expenses.csv.txt"));
        assert!(!is_csv_filename("csv"));
        assert!(!is_csv_filename(".csv"));
        assert!(!is_csv_filename(""));
    }
}
