use std::cell::RefCell;
use std::rc::Rc;

use gloo::file::File;
use gloo::timers::callback::{Interval, Timeout};
use plansift_core::{Effect, Event, ReadError, SelectedFile, SimulationConfig, UploadMachine};
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Event as ChangeEvent, FileList, HtmlInputElement};
use yew::prelude::*;

use crate::AuthContext;

// Constants
const ACCEPTED_EXTENSIONS: &str = ".jpg,.jpeg,.png";
const MAX_FILE_SIZE_MB: u32 = 50; // advisory, shown as help text only

type Machine = UploadMachine<File>;

#[derive(Properties, PartialEq)]
pub struct UploadProps {
    /// Called once per completed analysis simulation with the file's
    /// full data URL (e.g. `data:image/png;base64,...`).
    pub on_complete: Callback<String>,
}

/// RAII timer handles; dropping one clears the underlying browser timer,
/// so unmount cleanup is just dropping whatever is still here.
#[derive(Default)]
struct TimerHandles {
    ticker: Option<Interval>,
    completion: Option<Timeout>,
}

/// Everything a timer or read callback needs to feed events back into
/// the machine. All fields are stable across renders.
#[derive(Clone)]
struct WidgetCtx {
    machine: Rc<RefCell<Machine>>,
    timers: Rc<RefCell<TimerHandles>>,
    update: UseForceUpdateHandle,
    on_complete: Callback<String>,
}

fn dispatch(ctx: &WidgetCtx, event: Event<File>, authorized: bool) {
    let effects = ctx.machine.borrow_mut().apply(event, authorized);
    for effect in effects {
        match effect {
            Effect::Read { token, file } => {
                let ctx = ctx.clone();
                spawn_local(async move {
                    let result = gloo::file::futures::read_as_data_url(&file)
                        .await
                        .map_err(|error| ReadError::Failed(error.to_string()));
                    // Read completion is internal, not auth-gated.
                    dispatch(&ctx, Event::ReadFinished { token, result }, true);
                });
            }
            Effect::StartTicker { interval_ms } => {
                let tick_ctx = ctx.clone();
                let interval = Interval::new(interval_ms, move || {
                    dispatch(&tick_ctx, Event::Tick, true);
                });
                ctx.timers.borrow_mut().ticker = Some(interval);
            }
            Effect::StopTicker => {
                ctx.timers.borrow_mut().ticker = None;
            }
            Effect::ScheduleCompletion { delay_ms } => {
                let delay_ctx = ctx.clone();
                let timeout = Timeout::new(delay_ms, move || {
                    delay_ctx.timers.borrow_mut().completion = None;
                    dispatch(&delay_ctx, Event::DelayElapsed, true);
                });
                ctx.timers.borrow_mut().completion = Some(timeout);
            }
            Effect::CancelCompletion => {
                ctx.timers.borrow_mut().completion = None;
            }
            Effect::Notify { payload } => {
                log::debug!("analysis simulation finished, notifying caller");
                ctx.on_complete.emit(payload);
            }
        }
    }
    ctx.update.force_update();
}

fn first_file(list: Option<FileList>) -> Option<SelectedFile<File>> {
    let file = list?.get(0)?;
    let file = File::from(file);
    Some(SelectedFile {
        name: file.name(),
        handle: file,
    })
}

fn status_text(progress: u8) -> &'static str {
    if progress < 100 {
        "Analyzing Floor Plan..."
    } else {
        "Redirecting..."
    }
}

#[function_component(Upload)]
pub fn upload(props: &UploadProps) -> Html {
    let auth = use_context::<AuthContext>().unwrap_or_default();
    let signed_in = auth.signed_in;

    let machine = use_mut_ref(|| Machine::new(SimulationConfig::default()));
    let timers = use_mut_ref(TimerHandles::default);
    let update = use_force_update();

    let ctx = WidgetCtx {
        machine: machine.clone(),
        timers: timers.clone(),
        update,
        on_complete: props.on_complete.clone(),
    };

    // Unmount must cancel the ticker and the pending completion delay;
    // dropping the handles clears both browser timers.
    {
        let timers = timers.clone();
        use_effect_with((), move |_| {
            move || {
                let mut timers = timers.borrow_mut();
                timers.ticker = None;
                timers.completion = None;
            }
        });
    }

    let on_input_change = {
        let ctx = ctx.clone();
        Callback::from(move |e: ChangeEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatch(&ctx, Event::InputChange(first_file(input.files())), signed_in);
        })
    };

    let on_drag_enter = {
        let ctx = ctx.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            dispatch(&ctx, Event::DragEnter, signed_in);
        })
    };

    let on_drag_over = {
        let ctx = ctx.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            dispatch(&ctx, Event::DragOver, signed_in);
        })
    };

    let on_drag_leave = {
        let ctx = ctx.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            dispatch(&ctx, Event::DragLeave, signed_in);
        })
    };

    let on_drop = {
        let ctx = ctx.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            let files = e.data_transfer().and_then(|transfer| transfer.files());
            dispatch(&ctx, Event::Drop(first_file(files)), signed_in);
        })
    };

    let (file_name, progress, dragging) = {
        let machine = machine.borrow();
        (
            machine.file().map(|file| file.name.clone()),
            machine.progress(),
            machine.dragging(),
        )
    };

    html! {
        <div class="upload">
            if let Some(file_name) = file_name {
                <div class="upload-status">
                    <div class="status-content">
                        <div class="status-icon">
                            if progress == 100 {
                                <svg class="check" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z" />
                                </svg>
                            } else {
                                <svg class="image" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M4 16l4.586-4.586a2 2 0 012.828 0L16 16m-2-2l1.586-1.586a2 2 0 012.828 0L20 14m-6-6h.01M6 20h12a2 2 0 002-2V6a2 2 0 00-2-2H6a2 2 0 00-2 2v12a2 2 0 002 2z" />
                                </svg>
                            }
                        </div>

                        <h3>{file_name}</h3>

                        <div class="progress">
                            <div class="bar" style={format!("width: {}%", progress)}></div>

                            <p class="status-text">
                                {status_text(progress)}
                            </p>
                        </div>
                    </div>
                </div>
            } else {
                <div
                    class={classes!("dropzone", dragging.then_some("is-dragging"))}
                    ondragover={on_drag_over}
                    ondragenter={on_drag_enter}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                >
                    <input
                        type="file"
                        class="drop-input"
                        accept={ACCEPTED_EXTENSIONS}
                        disabled={!signed_in}
                        onchange={on_input_change}
                    />
                    <div class="drop-content">
                        <div class="drop-icon">
                            <svg fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M7 16a4 4 0 01-.88-7.903A5 5 0 1115.9 6L16 6a5 5 0 011 9.9M15 13l-3-3m0 0l-3 3m3-3v12" />
                            </svg>
                        </div>
                        <p>
                            { if signed_in {
                                "Click to upload or just drag and drop"
                            } else {
                                "Sign in to upload a floor plan"
                            } }
                        </p>
                        <p class="help">{format!("Maximum file size {} MB.", MAX_FILE_SIZE_MB)}</p>
                    </div>
                </div>
            }
        </div>
    }
}
