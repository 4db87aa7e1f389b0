//! Paged Memory Simulator - Main Entry Point
//!
//! Interactive menu-driven simulator for paged memory management. On
//! startup the user supplies three sizes (physical memory, frame/page,
//! max process), all powers of two; the menu then drives the memory
//! manager: create and remove processes, inspect physical memory and
//! page tables, and translate logical addresses to physical ones.
//!
//! All parsing and presentation lives here; the library core only
//! returns structured results and error kinds.

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};

use pagesim::{MemoryConfig, MemoryManager};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("\n>>> Starting paged memory simulator...");

    let config = configure_system()?;
    let mut manager = MemoryManager::new(config);

    loop {
        display_menu(&config);
        let choice = read_input("\nChoose an option: ")?;

        match choice.as_str() {
            "1" => view_memory(&manager)?,
            "2" => create_process_menu(&mut manager)?,
            "3" => remove_process_menu(&mut manager)?,
            "4" => page_table_menu(&manager)?,
            "5" => translate_menu(&manager)?,
            "6" => list_processes_menu(&manager)?,
            "7" => {
                println!("\nLeaving simulator.\n");
                return Ok(());
            }
            _ => {
                println!("\n[ERROR] Invalid option! Please choose an option from 1 to 7.");
                pause()?;
            }
        }
    }
}

/// Prompt, then read one trimmed line. EOF on stdin ends the simulator.
fn read_input(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;

    if bytes == 0 {
        println!("\n\nLeaving simulator.\n");
        process::exit(0);
    }
    Ok(line.trim().to_string())
}

fn pause() -> Result<()> {
    read_input("\nPress ENTER to continue...")?;
    Ok(())
}

fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
}

/// Keep prompting until the user supplies a positive power of two no
/// larger than `limit` (if any).
fn prompt_power_of_two(prompt: &str, limit: Option<usize>) -> Result<usize> {
    loop {
        let input = read_input(prompt)?;
        let value: usize = match input.parse() {
            Ok(v) => v,
            Err(_) => {
                println!("[ERROR] Invalid value! Enter a positive integer.\n");
                continue;
            }
        };

        if !value.is_power_of_two() {
            println!("[ERROR] The value must be a power of two!\n");
            continue;
        }
        if let Some(limit) = limit {
            if value > limit {
                println!("[ERROR] The value cannot exceed the physical memory size ({limit} bytes)!\n");
                continue;
            }
        }
        return Ok(value);
    }
}

/// Startup wizard for the three sizing parameters.
fn configure_system() -> Result<MemoryConfig> {
    println!("\n{}", "=".repeat(70));
    println!("   MEMORY MANAGEMENT SYSTEM CONFIGURATION");
    println!("{}", "=".repeat(70));
    println!("\nAll values must be powers of two (e.g. 64, 128, 256, 512, 1024...)\n");

    let physical_size = prompt_power_of_two("Physical memory size (in bytes): ", None)?;
    let frame_size = prompt_power_of_two("Frame/page size (in bytes): ", Some(physical_size))?;
    let max_process_size =
        prompt_power_of_two("Maximum process size (in bytes): ", Some(physical_size))?;

    let config = MemoryConfig::new(physical_size, frame_size, max_process_size)
        .context("configuration rejected")?;

    println!("\n{}", "=".repeat(70));
    println!("[OK] Configuration complete!");
    println!("{}", "=".repeat(70));
    Ok(config)
}

fn display_menu(config: &MemoryConfig) {
    println!("\n{}", "=".repeat(60));
    println!("       PAGED MEMORY MANAGEMENT SIMULATOR");
    println!("{}", "=".repeat(60));
    println!("\nConfiguration:");
    println!("  - Physical memory: {} bytes", config.physical_size());
    println!("  - Page size: {} bytes", config.frame_size());
    println!("  - Maximum process size: {} bytes", config.max_process_size());
    println!("\n{}", "-".repeat(60));
    println!("1. View physical memory");
    println!("2. Create process");
    println!("3. Remove process");
    println!("4. View page table");
    println!("5. Translate logical address to physical");
    println!("6. List processes");
    println!("7. Quit");
    println!("{}", "-".repeat(60));
}

/// Option 1: per-frame view of physical memory.
fn view_memory(manager: &MemoryManager) -> Result<()> {
    clear_screen();

    let stats = manager.statistics();
    println!("\n{}", "=".repeat(60));
    println!("                    PHYSICAL MEMORY");
    println!("{}", "=".repeat(60));
    println!("Total size: {} bytes", manager.physical_size());
    println!("Frame size: {} bytes", manager.frame_size());
    println!("Total frames: {}", stats.total_frames);
    println!(
        "Free frames: {} ({:.2}%)",
        stats.free_frames, stats.percent_free
    );
    println!(
        "Used frames: {} ({:.2}%)",
        stats.used_frames, stats.percent_used
    );
    println!("{}", "=".repeat(60));

    let frame_size = manager.frame_size();
    for frame in 0..manager.total_frames() {
        let start = frame * frame_size;
        let end = start + frame_size - 1;

        match manager.frame_owner(frame) {
            None => println!("\nFrame {frame:2} [{start:4}-{end:4}] - FREE"),
            Some(pid) => {
                println!("\nFrame {frame:2} [{start:4}-{end:4}] - PID {pid}");
                let preview = hex_preview(manager.frame_data(frame), 16);
                println!("  Data: {preview} ...");
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    pause()
}

/// First `count` bytes as space-separated hex.
fn hex_preview(data: &[u8], count: usize) -> String {
    data.iter()
        .take(count)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Option 2: create a process.
fn create_process_menu(manager: &mut MemoryManager) -> Result<()> {
    clear_screen();
    println!("\n{}", "-".repeat(60));
    println!("CREATE NEW PROCESS");
    println!("{}", "-".repeat(60));

    let id_input = read_input("\nEnter the process id (integer): ")?;
    let id = match id_input.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("\n[ERROR] Invalid id! It must be a non-negative integer.");
            return pause();
        }
    };

    let max = manager.config().max_process_size();
    let size_input = read_input(&format!("Enter the process size in bytes (max {max}): "))?;
    let size: usize = match size_input.parse::<i64>() {
        Ok(v) if v > 0 => v as usize,
        Ok(_) => {
            println!("\n[ERROR] Size must be greater than zero!");
            return pause();
        }
        Err(_) => {
            println!("\n[ERROR] Invalid size! It must be an integer.");
            return pause();
        }
    };

    match manager.create_process(id, size) {
        Ok(()) => {
            let pages = manager.process(id).map(|p| p.num_pages()).unwrap_or(0);
            println!("\n[OK] Process {id} created!");
            println!("   Size: {size} bytes");
            println!("   Pages allocated: {pages}");
        }
        Err(e) => println!("\n[ERROR] {e}"),
    }
    pause()
}

/// Prints the ids of resident processes, or a notice when there are
/// none. Returns false in the empty case so menus can bail out early.
fn show_available_processes(manager: &MemoryManager) -> bool {
    let roster = manager.processes();
    if roster.is_empty() {
        println!("\n[NOTE] No processes are running.");
        return false;
    }

    let ids: Vec<String> = roster.iter().map(|r| r.id.to_string()).collect();
    println!("\nAvailable processes: {}", ids.join(", "));
    true
}

fn read_process_id(manager: &MemoryManager, prompt: &str) -> Result<Option<u32>> {
    if !show_available_processes(manager) {
        return Ok(None);
    }

    let input = read_input(prompt)?;
    match input.parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("\n[ERROR] Invalid id! It must be a non-negative integer.");
            Ok(None)
        }
    }
}

/// Option 3: remove a process.
fn remove_process_menu(manager: &mut MemoryManager) -> Result<()> {
    println!("\n{}", "-".repeat(60));
    println!("REMOVE PROCESS");
    println!("{}", "-".repeat(60));

    let Some(id) = read_process_id(manager, "\nEnter the id of the process to remove: ")? else {
        return pause();
    };

    let pages = manager.process(id).map(|p| p.num_pages());
    match manager.remove_process(id) {
        Ok(()) => {
            println!("\n[OK] Process {id} removed!");
            if let Some(pages) = pages {
                println!("   {pages} frames freed");
            }
        }
        Err(e) => println!("\n[ERROR] {e}"),
    }
    pause()
}

/// Option 4: show a process's page table.
fn page_table_menu(manager: &MemoryManager) -> Result<()> {
    println!("\n{}", "-".repeat(60));
    println!("VIEW PAGE TABLE");
    println!("{}", "-".repeat(60));

    let Some(id) = read_process_id(manager, "\nEnter the process id: ")? else {
        return pause();
    };

    match manager.page_table(id) {
        Ok(entries) => {
            let process = manager
                .process(id)
                .expect("page_table succeeded, so the process is resident");

            println!("\n{}", "=".repeat(50));
            println!("        PAGE TABLE - PROCESS {id}");
            println!("{}", "=".repeat(50));
            println!("Process size: {} bytes", process.size());
            println!("Number of pages: {}", process.num_pages());
            println!("\n+--------------+--------------+");
            println!("|  Page number | Frame number |");
            println!("+--------------+--------------+");
            for (page, frame) in entries {
                println!("| {page:>12} | {frame:>12} |");
            }
            println!("+--------------+--------------+");
            println!("{}", "=".repeat(50));
        }
        Err(e) => println!("\n[ERROR] {e}"),
    }
    pause()
}

/// Option 5: translate a logical address.
fn translate_menu(manager: &MemoryManager) -> Result<()> {
    println!("\n{}", "-".repeat(60));
    println!("TRANSLATE LOGICAL ADDRESS TO PHYSICAL");
    println!("{}", "-".repeat(60));

    let Some(id) = read_process_id(manager, "\nEnter the process id: ")? else {
        return pause();
    };

    let Some(process) = manager.process(id) else {
        println!("\n[ERROR] Process {id} not found!");
        return pause();
    };
    let size = process.size();

    let addr_input = read_input(&format!("\nEnter the logical address (0-{}): ", size - 1))?;
    let address: usize = match addr_input.parse::<i64>() {
        Ok(v) if v >= 0 => v as usize,
        Ok(v) => {
            // Negative input never reaches the core; report it the way
            // the core reports any out-of-range address.
            println!("\n[ERROR] logical address {v} outside the address space 0..{size}");
            return pause();
        }
        Err(_) => {
            println!("\n[ERROR] Invalid address! It must be an integer.");
            return pause();
        }
    };

    match manager.translate(id, address) {
        Ok(t) => {
            println!("\n{}", "=".repeat(60));
            println!("TRANSLATION RESULT");
            println!("{}", "=".repeat(60));
            println!("Logical address:     {}", t.logical_address);
            println!("Page number:         {}", t.page_number);
            println!("Offset:              {}", t.offset);
            println!("Frame number:        {}", t.frame_number);
            println!("Physical address:    {}", t.physical_address);
            println!("Stored value:        0x{:02x} ({})", t.value, t.value);
            println!("{}", "=".repeat(60));
        }
        Err(e) => println!("\n[ERROR] {e}"),
    }
    pause()
}

/// Option 6: list resident processes.
fn list_processes_menu(manager: &MemoryManager) -> Result<()> {
    let roster = manager.processes();
    if roster.is_empty() {
        println!("\n[NOTE] No processes are running.");
        return pause();
    }

    println!("\n{}", "=".repeat(50));
    println!("                RUNNING PROCESSES");
    println!("{}", "=".repeat(50));

    for report in roster {
        println!("\nProcess id: {}", report.id);
        println!("  Size: {} bytes", report.size);
        println!("  Pages: {}", report.num_pages);
        println!("  Frames: {:?}", report.frames);
    }

    println!("\n{}", "=".repeat(50));
    pause()
}
