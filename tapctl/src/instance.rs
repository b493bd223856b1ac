//! Operations shared by applications and services

use std::io::Write;

use anyhow::Result;

use tap::prelude::*;
use tap::resolve::fetch_instance_id_and_type;

use crate::command::ParsedArgs;
use crate::printer::Printer;

pub fn lifecycle<A: Api + ?Sized, W: Write>(
    api: &A,
    out: &mut Printer<W>,
    instance_type: InstanceType,
    name: &str,
    action: Lifecycle,
) -> Result<()> {
    let instance = fetch_instance_id_and_type(api, instance_type.into(), name)?;
    api.lifecycle(&instance, action)?;

    log::info!("Sent {action} to {instance_type} {}", instance.id);
    out.message(format!("Sent {action} to {instance_type} {name}"))
}

pub fn logs<A: Api + ?Sized, W: Write>(
    api: &A,
    out: &mut Printer<W>,
    instance_type: InstanceType,
    name: &str,
) -> Result<()> {
    let instance = fetch_instance_id_and_type(api, instance_type.into(), name)?;

    for (container, logs) in api.logs(&instance)? {
        out.message(format!("[{container}]"))?;
        out.message(logs.trim_end())?;
    }
    Ok(())
}

pub fn bindings<A: Api + ?Sized, W: Write>(
    api: &A,
    out: &mut Printer<W>,
    instance_type: InstanceType,
    name: &str,
) -> Result<()> {
    let instance = fetch_instance_id_and_type(api, instance_type.into(), name)?;
    out.list(&api.bindings(&instance)?)
}

/// Binds or unbinds `<SRC> <DST>`
///
/// The destination is looked up among instances of `instance_type`, the
/// source among applications and services.
pub fn bind<A: Api + ?Sized, W: Write>(
    api: &A,
    out: &mut Printer<W>,
    instance_type: InstanceType,
    args: &ParsedArgs,
    unbind: bool,
) -> Result<()> {
    let (Some(source), Some(destination)) = (args.positional(0), args.positional(1)) else {
        anyhow::bail!("expected <SRC> and <DST> arguments");
    };

    let destination_ref = fetch_instance_id_and_type(api, instance_type.into(), destination)?;
    let source_ref = fetch_instance_id_and_type(api, TypeHint::Both, source)?;

    if unbind {
        api.unbind(&destination_ref, &source_ref)?;
        out.message(format!("Instance {source} unbound from {destination}"))
    } else {
        api.bind(&destination_ref, &source_ref)?;
        out.message(format!("Instance {source} bound to {destination}"))
    }
}
